//! State machine Python binding.
//!
//! Exposes `PioState` to Python test harnesses: load a program with out-buffer words,
//! step one cycle at a time, drive outside pins between steps, and inspect registers.

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use piosim_core::config::Config;
use piosim_core::sim::loader::Program;
use piosim_core::soc::OutBuffer;
use piosim_core::PioState;

use crate::conversion::py_dict_to_config;
use crate::errors::{load_error, pio_error};

/// Python-exposed state machine. Created empty; `start` loads a program into it.
#[pyclass]
pub struct PyPioState {
    config: Config,
    inner: Option<PioState>,
}

impl PyPioState {
    fn state(&self) -> PyResult<&PioState> {
        self.inner
            .as_ref()
            .ok_or_else(|| PyRuntimeError::new_err("no program loaded; call start() first"))
    }

    fn state_mut(&mut self) -> PyResult<&mut PioState> {
        self.inner
            .as_mut()
            .ok_or_else(|| PyRuntimeError::new_err("no program loaded; call start() first"))
    }
}

#[pymethods]
impl PyPioState {
    /// Creates an idle state machine.
    ///
    /// # Arguments
    /// * `config_dict` - Optional config dict (`assembler.max_delay`, `pins.initial`).
    #[new]
    #[pyo3(signature = (config_dict=None))]
    fn new(py: Python<'_>, config_dict: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        Ok(Self {
            config: py_dict_to_config(py, config_dict)?,
            inner: None,
        })
    }

    /// Loads program text and stages `words` in the out buffer, resetting all state.
    ///
    /// # Errors
    /// Raises `ValueError` naming the first line that fails to decode.
    #[pyo3(signature = (program, words=Vec::new()))]
    pub fn start(&mut self, program: &str, words: Vec<u32>) -> PyResult<()> {
        let program = Program::parse_with(program, &self.config.assembler).map_err(|e| load_error(&e))?;
        let mut state = PioState::new(program, OutBuffer::from_words(&words));
        for (&pin, &level) in &self.config.pins.initial {
            state.set_outside_pin(pin, level);
        }
        self.inner = Some(state);
        Ok(())
    }

    /// Advances one step and returns its trace line, e.g. `"4: EXEC OUT"`.
    ///
    /// # Errors
    /// Raises `EmptyOutBufferError` when an `OUT` runs out of bits, `ValueError` for any
    /// other failure. The state is unchanged in both cases.
    pub fn process_next_step(&mut self) -> PyResult<String> {
        let trace = self.state_mut()?.step().map_err(|e| pio_error(&e))?;
        Ok(trace.to_string())
    }

    /// Reads an outside pin; pins never set read low.
    pub fn get_outside_pin(&self, pin: u32) -> PyResult<bool> {
        Ok(self.state()?.get_outside_pin(pin))
    }

    /// Drives an outside pin.
    pub fn set_outside_pin(&mut self, pin: u32, level: bool) -> PyResult<()> {
        self.state_mut()?.set_outside_pin(pin, level);
        Ok(())
    }

    #[getter]
    fn x(&self) -> PyResult<u32> {
        Ok(self.state()?.x())
    }
    #[getter]
    fn y(&self) -> PyResult<u32> {
        Ok(self.state()?.y())
    }
    #[getter]
    fn instruction_index(&self) -> PyResult<usize> {
        Ok(self.state()?.instruction_index)
    }
    #[getter]
    fn current_delay(&self) -> PyResult<u32> {
        Ok(self.state()?.current_delay)
    }
    #[getter]
    fn internal_pin(&self) -> PyResult<bool> {
        Ok(self.state()?.internal_pin)
    }
    #[getter]
    fn is_waiting(&self) -> PyResult<bool> {
        Ok(self.state()?.is_waiting())
    }
    #[getter]
    fn cycle(&self) -> PyResult<u64> {
        Ok(self.state()?.cycle)
    }
    #[getter]
    fn out_buffer(&self) -> PyResult<Vec<u8>> {
        Ok(self.state()?.out_buffer.bits().to_vec())
    }

    /// Serializes the full machine state (program included) to JSON, for fixtures.
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(self.state()?)
            .map_err(|e| PyRuntimeError::new_err(format!("cannot serialize state: {e}")))
    }
}
