//! State machine core.
//!
//! This module contains the PIO state machine itself: its architectural state,
//! the single-cycle step that advances it, the outside pins it can poll, and the
//! per-cycle trace each step produces.

/// Machine state and the execution engine.
pub mod machine;

/// Externally driven pin levels.
pub mod pins;

/// Per-cycle trace records.
pub mod trace;

pub use self::machine::PioState;
pub use self::pins::OutsidePins;
pub use self::trace::{CycleEvent, CycleTrace};
