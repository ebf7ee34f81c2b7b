//! Simulation utilities and program loading.
//!
//! Provides the program loader (comment stripping, label resolution, decoding)
//! and the `Simulator` driver that steps a loaded program with statistics and
//! scheduled pin changes.

pub mod loader;
pub mod simulator;
