//! Global Simulator Constants.
//!
//! This module defines constants shared across the simulator. It includes:
//! 1. **Data Constants:** Width of a FIFO word as seen by `OUT`.
//! 2. **Timing Constants:** The default upper bound of a `[n]` delay annotation.
//! 3. **Assembler Constants:** Reserved label and directive names.

/// Number of bits in one word pushed through the out buffer.
pub const WORD_BITS: u32 = 32;

/// Largest delay annotation accepted by default.
///
/// The RP2040 encodes delay and side-set in a shared 5-bit field, which puts the hardware bound
/// at 31. Set `assembler.max_delay` to 31 to match it.
pub const DEFAULT_MAX_DELAY: u32 = 32;

/// Directive marking the instruction that `.wrap` returns to; stored in the label table under this name.
pub const WRAP_TARGET: &str = ".wrap_target";

/// Directive that jumps back to [`WRAP_TARGET`].
pub const WRAP: &str = ".wrap";

/// Character that starts a comment on a program line.
pub const COMMENT_CHAR: char = ';';

/// Suffix that marks the first token of a line as a label definition.
pub const LABEL_SUFFIX: char = ':';

/// Prefix that marks the first token of a line as an assembler directive.
pub const DIRECTIVE_PREFIX: char = '.';
