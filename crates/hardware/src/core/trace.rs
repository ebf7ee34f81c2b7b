//! Cycle trace records.
//!
//! Every call to `PioState::step` returns a `CycleTrace` describing what happened.
//! Traces are diagnostics for the caller; they carry no state of their own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::isa::Mnemonic;

/// What a single step did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleEvent {
    /// A `[n]` delay was counted down; no instruction ran.
    Delay,
    /// A `WAIT` condition was polled. `released` is set on the cycle it stopped blocking.
    Wait {
        /// The condition cleared during this cycle.
        released: bool,
    },
    /// A label-only, directive, or empty line was skipped without using a cycle.
    NonInstruction {
        /// Text of the skipped line.
        line: String,
    },
    /// A non-jump instruction executed.
    Executed(Mnemonic),
    /// A `JMP` was taken.
    JumpTaken {
        /// Label jumped to.
        label: String,
    },
    /// A conditional `JMP` fell through.
    JumpNotTaken,
}

/// Trace of one step: the cycle number and what happened in it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleTrace {
    /// Cycle counter value this step ran in.
    pub cycle: u64,
    /// What happened.
    pub event: CycleEvent,
}

impl CycleTrace {
    /// Returns `true` if this step consumed a cycle.
    pub const fn consumed_cycle(&self) -> bool {
        !matches!(self.event, CycleEvent::NonInstruction { .. })
    }
}

impl fmt::Display for CycleTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cycle = self.cycle;
        match &self.event {
            CycleEvent::Delay => write!(f, "{cycle}: DELAYING"),
            CycleEvent::Wait { .. } => write!(f, "{cycle}: WAITING"),
            CycleEvent::NonInstruction { line } => write!(f, "NON INSTRUCTION LINE:{line}"),
            CycleEvent::Executed(mnemonic) => write!(f, "{cycle}: EXEC {mnemonic}"),
            CycleEvent::JumpTaken { label } => write!(f, "{cycle}: EXEC JMP to {label}"),
            CycleEvent::JumpNotTaken => write!(f, "{cycle}: EXEC NO JMP"),
        }
    }
}
