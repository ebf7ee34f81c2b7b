//! Mapping of simulator errors onto Python exceptions.
//!
//! Every error becomes a `ValueError`. Running out of out-buffer bits gets its own
//! subclass, `EmptyOutBufferError`, because harnesses treat it as the end of a
//! transmission rather than a bug in the program.

use pyo3::create_exception;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use piosim_core::common::{LoadError, PioError, RunError};

create_exception!(
    piosim,
    EmptyOutBufferError,
    PyValueError,
    "Raised when OUT needs more bits than remain in the out buffer."
);

/// Converts a step error.
pub fn pio_error(err: &PioError) -> PyErr {
    match err {
        PioError::BufferUnderflow { .. } => EmptyOutBufferError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Converts a load error. The message carries the offending line index.
pub fn load_error(err: &LoadError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Converts a run error, keeping the underflow distinction of [`pio_error`].
pub fn run_error(err: &RunError) -> PyErr {
    match err.kind {
        PioError::BufferUnderflow { .. } => EmptyOutBufferError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}
