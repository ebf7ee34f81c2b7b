//! PIO state machine simulator library.
//!
//! This crate dry-runs programmable I/O (PIO) programs one cycle at a time, with the following:
//! 1. **ISA:** Typed `SET`/`OUT`/`WAIT`/`JMP`/`MOV` instructions, a line decoder, and a disassembler.
//! 2. **Core:** The machine state (`x`/`y`, program counter, delay, pins) and its single-cycle step.
//! 3. **SoC:** The out buffer of staged bits that `OUT` shifts from.
//! 4. **Simulation:** Program loading, label resolution, the run driver, configuration, and statistics.

/// Common types (errors, registers, constants).
pub mod common;
/// Simulator configuration (defaults and JSON-deserializable config tree).
pub mod config;
/// Machine state and the execution engine.
pub mod core;
/// Instruction set (instruction types, line decoding, disassembly).
pub mod isa;
/// Program loader and run driver.
pub mod sim;
/// Host-side data staging (the out buffer).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Machine state; construct with `PioState::load` and advance with `step`.
pub use crate::core::PioState;
/// Loaded program (lines, decoded instructions, label table).
pub use crate::sim::loader::Program;
/// Top-level driver (state + stats + scheduled pin events).
pub use crate::sim::simulator::Simulator;
/// Staged bits consumed by `OUT`.
pub use crate::soc::buffer::OutBuffer;
