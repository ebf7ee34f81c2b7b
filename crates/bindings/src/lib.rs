//! Python bindings for the PIO state machine simulator.
//!
//! This crate exposes the simulator to Python via PyO3. It provides:
//! 1. **State machine:** `PyPioState` for cycle-by-cycle stepping from a test harness.
//! 2. **Simulator:** `PySimulator` for scheduled pin changes and runs to a stop.
//! 3. **Statistics:** `PyStats` for run metrics and selective section printing.
//! 4. **Utilities:** Version string, program listing, and the `EmptyOutBufferError` exception.

use pyo3::prelude::*;

/// Python dict to Rust `Config` conversion.
pub mod conversion;
/// Error to exception mapping.
pub mod errors;
/// Simulator binding (`PySimulator`).
pub mod simulator;
/// State machine binding (`PyPioState`).
pub mod state;
/// Statistics binding (`PyStats`).
pub mod stats;
/// Utility functions (e.g., version).
pub mod utils;

/// Registers all simulator classes, functions, and exceptions onto the given Python module.
///
/// Called from the `#[pymodule]` entry point and by the CLI's script runner.
///
/// # Arguments
///
/// * `m` - The Python module to register types and functions on.
///
/// # Returns
///
/// `Ok(())` on success, or a `PyErr` if registration fails.
pub fn register_piosim_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<state::PyPioState>()?;
    m.add_class::<simulator::PySimulator>()?;
    m.add_class::<stats::PyStats>()?;

    m.add(
        "EmptyOutBufferError",
        m.py().get_type::<errors::EmptyOutBufferError>(),
    )?;

    m.add_function(wrap_pyfunction!(utils::version, m)?)?;
    m.add_function(wrap_pyfunction!(utils::disassemble, m)?)?;

    Ok(())
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register_piosim_module(m)?;
    Ok(())
}
