//! Common utilities and types used throughout the PIO simulator.
//!
//! This module provides the building blocks shared by the loader, the decoder, and the
//! execution engine. It includes:
//! 1. **Constants:** Word width, delay bound, and reserved label names.
//! 2. **Error Handling:** The error taxonomy for loading and stepping a program.
//! 3. **Register Management:** The `x`/`y` scratch registers and their names.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for loading and execution.
pub mod error;

/// Scratch register file implementation.
pub mod reg;

pub use constants::{DEFAULT_MAX_DELAY, WORD_BITS, WRAP_TARGET};
pub use error::{LoadError, PioError, RunError};
pub use reg::{Register, RegisterFile};
