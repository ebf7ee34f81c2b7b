//! Out Buffer Implementation.
//!
//! This module models the data a host pushes into the state machine's TX FIFO, flattened
//! to individual bits. It provides:
//! 1. **Expansion:** `number_to_bits` spreads a word over 32 LSB-first positions.
//! 2. **Construction:** `build_out_buffer` stacks words so the first one is consumed first.
//! 3. **Consumption:** `OutBuffer::pop_bits` shifts bits off the tail, most significant first.
//!
//! The resulting read order, for `build_out_buffer(&[a, b])`, is bit 31 of `a` down to
//! bit 0 of `a`, followed by bit 31 of `b` down to bit 0 of `b`. An `OUT x 8` on a word
//! holding `0xAB` therefore reads the top byte (zero), not `0xAB`.

use serde::{Deserialize, Serialize};

use crate::common::{PioError, WORD_BITS};

/// Expands a word into 32 bits, where position `i` holds bit `i` (LSB at position 0).
pub fn number_to_bits(value: u32) -> [u8; WORD_BITS as usize] {
    std::array::from_fn(|i| ((value >> i) & 1) as u8)
}

/// Builds the bit sequence for a list of words.
///
/// Each word's expansion is prepended to the buffer built so far, so the first word ends
/// up at the tail (consumed first) and the last word at the head.
pub fn build_out_buffer(words: &[u32]) -> OutBuffer {
    let mut bits = Vec::with_capacity(words.len() * WORD_BITS as usize);
    for &word in words.iter().rev() {
        bits.extend_from_slice(&number_to_bits(word));
    }
    OutBuffer { bits }
}

/// Ordered bits staged for `OUT`, consumed from the tail.
///
/// The buffer only shrinks once a run has started.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutBuffer {
    bits: Vec<u8>,
}

impl OutBuffer {
    /// Creates an empty buffer.
    pub const fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Wraps an explicit bit sequence. Any non-zero entry is stored as 1.
    pub fn from_bits(bits: impl IntoIterator<Item = u8>) -> Self {
        Self {
            bits: bits.into_iter().map(|b| u8::from(b != 0)).collect(),
        }
    }

    /// Builds a buffer from words; see [`build_out_buffer`].
    pub fn from_words(words: &[u32]) -> Self {
        build_out_buffer(words)
    }

    /// Number of bits left.
    pub const fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` once every bit has been consumed.
    pub const fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The remaining bits, head first. The last element is the next one `OUT` reads.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Pops `count` bits from the tail and assembles them MSB first.
    ///
    /// Each popped bit is shifted in from the right, so the first bit popped ends up
    /// as the most significant of the `count` result bits.
    ///
    /// # Errors
    ///
    /// Returns [`PioError::BufferUnderflow`] if fewer than `count` bits remain. Nothing is
    /// consumed in that case.
    pub fn pop_bits(&mut self, count: u32) -> Result<u32, PioError> {
        let available = self.bits.len();
        if count as usize > available {
            return Err(PioError::BufferUnderflow {
                requested: count,
                available,
            });
        }
        let value = self
            .bits
            .drain(available - count as usize..)
            .rev()
            .fold(0u32, |acc, bit| (acc << 1) | u32::from(bit));
        Ok(value)
    }
}
