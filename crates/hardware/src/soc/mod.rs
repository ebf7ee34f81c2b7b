//! Host-side data staging.
//!
//! Models what sits between the host and the state machine: the queue of bits
//! that `OUT` shifts from, filled from 32-bit words before a run starts.

/// Out buffer and the word-to-bit expansion helpers.
pub mod buffer;

pub use buffer::{OutBuffer, build_out_buffer, number_to_bits};
