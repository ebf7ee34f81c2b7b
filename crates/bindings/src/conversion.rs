//! Python to Rust configuration conversion.
//!
//! Converts Python dicts into the core `Config` type via JSON serialization, so the same
//! schema is used from both Python and the CLI's `--config` file.

use pyo3::prelude::*;
use piosim_core::config::Config;

/// Converts a Python dict to a simulator `Config`.
///
/// The dict is serialized to JSON and then deserialized into `Config`. Keys must match
/// the Rust config structure (`general`, `assembler`, `pins`). Pin indices may be given
/// as ints; `json.dumps` turns them into the string keys serde expects.
///
/// # Arguments
///
/// * `py` - Python interpreter handle.
/// * `dict` - A Python dict, or `None` for the defaults.
///
/// # Returns
///
/// The deserialized `Config`, or a `PyErr` if the dict is invalid.
pub fn py_dict_to_config(py: Python<'_>, dict: Option<&Bound<'_, PyAny>>) -> PyResult<Config> {
    let Some(dict) = dict else {
        return Ok(Config::default());
    };
    let json = py.import("json")?;
    let dumps = json.getattr("dumps")?;
    let json_str: String = dumps.call1((dict,))?.extract()?;

    serde_json::from_str(&json_str).map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Invalid config: {e}"))
    })
}
