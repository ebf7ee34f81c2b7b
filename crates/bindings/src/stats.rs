//! Statistics Python binding.
//!
//! Exposes run statistics to Python: getters for the cycle breakdown and instruction mix,
//! `print` / `print_sections` for human-readable output, and `to_dict` for export.

use pyo3::prelude::*;
use piosim_core::stats::SimStats;

/// Python-exposed statistics: wraps `SimStats` for read and print from Python.
#[pyclass]
#[derive(Clone)]
pub struct PyStats {
    pub inner: SimStats,
}

#[pymethods]
impl PyStats {
    /// Print all stats (full dump).
    fn print(&self) {
        self.inner.print();
    }

    /// Print only the given sections. Options: "summary", "cycles", "instruction_mix", "control".
    /// Pass an empty list for full dump.
    fn print_sections(&self, sections: Vec<String>) {
        self.inner.print_sections(&sections);
    }

    #[getter]
    fn cycles(&self) -> u64 {
        self.inner.cycles
    }
    #[getter]
    fn instructions_executed(&self) -> u64 {
        self.inner.instructions_executed
    }
    #[getter]
    fn delay_cycles(&self) -> u64 {
        self.inner.delay_cycles
    }
    #[getter]
    fn wait_cycles(&self) -> u64 {
        self.inner.wait_cycles
    }
    #[getter]
    fn jumps_taken(&self) -> u64 {
        self.inner.jumps_taken
    }
    #[getter]
    fn bits_consumed(&self) -> u64 {
        self.inner.bits_consumed
    }

    /// Returns every counter as a dict.
    fn to_dict(&self, py: Python<'_>) -> PyResult<Py<pyo3::types::PyDict>> {
        let d = pyo3::types::PyDict::new(py);
        let s = &self.inner;
        d.set_item("cycles", s.cycles)?;
        d.set_item("instructions_executed", s.instructions_executed)?;
        d.set_item("delay_cycles", s.delay_cycles)?;
        d.set_item("wait_cycles", s.wait_cycles)?;
        d.set_item("non_instruction_lines", s.non_instruction_lines)?;

        d.set_item("inst_set", s.inst_set)?;
        d.set_item("inst_out", s.inst_out)?;
        d.set_item("inst_wait", s.inst_wait)?;
        d.set_item("inst_jmp", s.inst_jmp)?;
        d.set_item("inst_mov", s.inst_mov)?;
        d.set_item("inst_wrap", s.inst_wrap)?;

        d.set_item("jumps_taken", s.jumps_taken)?;
        d.set_item("jumps_not_taken", s.jumps_not_taken)?;
        d.set_item("bits_consumed", s.bits_consumed)?;

        let busy = if s.cycles > 0 {
            100.0 * (s.instructions_executed as f64 / s.cycles as f64)
        } else {
            0.0
        };
        d.set_item("busy_pct", busy)?;

        Ok(d.into())
    }
}

impl From<SimStats> for PyStats {
    fn from(inner: SimStats) -> Self {
        PyStats { inner }
    }
}
