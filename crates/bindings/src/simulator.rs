//! Simulator Python binding.
//!
//! Exposes the `Simulator` driver to Python: create from program text and a config dict,
//! schedule outside pin changes, tick or run to a stop, and retrieve stats.

use std::io::Write;

use pyo3::prelude::*;
use piosim_core::Simulator;
use piosim_core::sim::simulator::StopReason;

use crate::conversion::py_dict_to_config;
use crate::errors::{load_error, pio_error, run_error};
use crate::stats::PyStats;

/// Python-exposed simulator: state machine plus statistics and a pin schedule.
#[pyclass]
pub struct PySimulator {
    pub inner: Simulator,
}

#[pymethods]
impl PySimulator {
    /// Loads a program and stages out-buffer words.
    ///
    /// # Arguments
    /// * `program` - Program text.
    /// * `words` - Words for the out buffer, first word shifted out first.
    /// * `config_dict` - Optional config dict.
    ///
    /// # Errors
    /// Raises `ValueError` naming the first line that fails to decode.
    #[new]
    #[pyo3(signature = (program, words=Vec::new(), config_dict=None))]
    fn new(
        py: Python<'_>,
        program: &str,
        words: Vec<u32>,
        config_dict: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<Self> {
        let config = py_dict_to_config(py, config_dict)?;
        let inner = Simulator::load(program, &words, &config).map_err(|e| load_error(&e))?;
        Ok(Self { inner })
    }

    /// Schedules an outside pin change at `cycle`.
    pub fn schedule_pin(&mut self, cycle: u64, pin: u32, level: bool) {
        self.inner.schedule_pin(cycle, pin, level);
    }

    /// Advances one step and returns its trace line.
    ///
    /// # Errors
    /// Raises `EmptyOutBufferError` or `ValueError` as `PyPioState.process_next_step` does.
    pub fn tick(&mut self) -> PyResult<String> {
        let trace = self.inner.tick().map_err(|e| pio_error(&e))?;
        Ok(trace.to_string())
    }

    /// Runs until the cycle limit, a stall, or an error.
    ///
    /// Checks for Python signals (e.g., Ctrl-C) between chunks of cycles.
    ///
    /// # Arguments
    /// * `limit` - Optional maximum number of cycles; falls back to `general.max_cycles`.
    ///
    /// # Returns
    ///
    /// `(cycles, reason)` where reason is `"cycle_limit"` or `"stalled"`.
    #[pyo3(signature = (limit=None))]
    pub fn run(&mut self, py: Python<'_>, limit: Option<u64>) -> PyResult<(u64, &'static str)> {
        const CHUNK: u64 = 10_000;
        let limit = limit.or(self.inner.max_cycles());
        let mut total = 0;
        loop {
            let remaining = limit.map(|max| max - total);
            let chunk = remaining.map_or(CHUNK, |r| r.min(CHUNK));
            let outcome = self
                .inner
                .run(Some(chunk))
                .map_err(|e| run_error(&e))?;
            total += outcome.cycles;

            let done = match outcome.reason {
                StopReason::Stalled => Some("stalled"),
                StopReason::CycleLimit if remaining.is_some_and(|r| r <= CHUNK) => Some("cycle_limit"),
                StopReason::CycleLimit => None,
            };
            if let Some(reason) = done {
                let _ = std::io::stdout().flush();
                return Ok((total, reason));
            }
            py.check_signals()?;
        }
    }

    /// Returns a snapshot of the statistics.
    pub fn get_stats(&self) -> PyStats {
        PyStats::from(self.inner.stats.clone())
    }

    /// Reads an outside pin.
    pub fn get_outside_pin(&self, pin: u32) -> bool {
        self.inner.state.get_outside_pin(pin)
    }

    /// Drives an outside pin immediately.
    pub fn set_outside_pin(&mut self, pin: u32, level: bool) {
        self.inner.state.set_outside_pin(pin, level);
    }

    #[getter]
    fn x(&self) -> u32 {
        self.inner.state.x()
    }
    #[getter]
    fn y(&self) -> u32 {
        self.inner.state.y()
    }
    #[getter]
    fn instruction_index(&self) -> usize {
        self.inner.state.instruction_index
    }
    #[getter]
    fn internal_pin(&self) -> bool {
        self.inner.state.internal_pin
    }
    #[getter]
    fn cycle(&self) -> u64 {
        self.inner.state.cycle
    }
}
