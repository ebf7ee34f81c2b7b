//! Utility functions exposed to Python.
//!
//! Provides version and listing helpers for the `piosim` module.

use pyo3::prelude::*;
use piosim_core::Program;

use crate::errors::load_error;

/// Returns the simulator version string (e.g., for scripting or diagnostics).
#[pyfunction]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Assembles a program and returns its canonical listing, one entry per line.
///
/// Label-only lines render as `name:`, empty lines as `""`.
///
/// # Errors
///
/// Raises `ValueError` naming the first line that fails to decode.
#[pyfunction]
pub fn disassemble(program: &str) -> PyResult<Vec<String>> {
    let program = Program::parse(program).map_err(|e| load_error(&e))?;
    Ok(program
        .instructions()
        .iter()
        .map(ToString::to_string)
        .collect())
}
