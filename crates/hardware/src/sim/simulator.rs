//! Simulator: owns the state machine alongside its statistics and pin schedule.
//!
//! `PioState::step` is the bare transition function. The `Simulator` wraps it with what a
//! harness needs to drive a whole run: configuration, per-cycle tracing, statistics, outside
//! pin changes scheduled at given cycles, and a run loop that reports where it stopped.

use crate::common::{LoadError, PioError, RunError};
use crate::config::Config;
use crate::core::PioState;
use crate::core::trace::{CycleEvent, CycleTrace};
use crate::sim::loader::Program;
use crate::soc::OutBuffer;
use crate::stats::SimStats;

/// An outside pin change applied before the first step at or after `cycle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinEvent {
    /// Cycle at which the level takes effect.
    pub cycle: u64,
    /// Pin index.
    pub pin: u32,
    /// New level.
    pub level: bool,
}

/// Why a run stopped without an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The cycle limit was reached.
    CycleLimit,
    /// The machine is blocked on a `WAIT` and no scheduled pin change can release it.
    Stalled,
}

/// Result of a run that stopped without an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Cycles elapsed during this run.
    pub cycles: u64,
    /// Why the run stopped.
    pub reason: StopReason,
}

/// Top-level simulator: state machine + statistics + pin schedule.
#[derive(Debug)]
pub struct Simulator {
    /// Architectural state of the state machine.
    pub state: PioState,
    /// Statistics collected so far.
    pub stats: SimStats,
    trace: bool,
    max_cycles: Option<u64>,
    pending: Vec<PinEvent>,
}

impl Simulator {
    /// Creates a simulator for a loaded program, applying the configured initial pin levels.
    pub fn new(program: Program, out_buffer: OutBuffer, config: &Config) -> Self {
        let mut state = PioState::new(program, out_buffer);
        for (&pin, &level) in &config.pins.initial {
            state.set_outside_pin(pin, level);
        }
        Self {
            state,
            stats: SimStats::default(),
            trace: config.general.trace_cycles,
            max_cycles: config.general.max_cycles,
            pending: Vec::new(),
        }
    }

    /// Loads program text with the configured assembler settings and stages `words`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] naming the first line that fails to decode.
    pub fn load(source: &str, words: &[u32], config: &Config) -> Result<Self, LoadError> {
        let program = Program::parse_with(source, &config.assembler)?;
        Ok(Self::new(program, OutBuffer::from_words(words), config))
    }

    /// Schedules an outside pin change.
    ///
    /// The level is applied just before the first step whose cycle counter is at least `cycle`.
    /// Events for the same cycle apply in the order they were scheduled.
    pub fn schedule_pin(&mut self, cycle: u64, pin: u32, level: bool) {
        let at = self.pending.partition_point(|e| e.cycle <= cycle);
        self.pending.insert(at, PinEvent { cycle, pin, level });
    }

    /// Cycle limit `run` falls back to when called without one.
    pub const fn max_cycles(&self) -> Option<u64> {
        self.max_cycles
    }

    /// Pin changes that have not been applied yet, in application order.
    pub fn pending_pin_events(&self) -> &[PinEvent] {
        &self.pending
    }

    /// Applies every scheduled pin change that is due.
    fn apply_due_pin_events(&mut self) {
        let now = self.state.cycle;
        let due = self.pending.partition_point(|e| e.cycle <= now);
        for event in self.pending.drain(..due) {
            tracing::debug!(
                cycle = now,
                pin = event.pin,
                level = event.level,
                "outside pin changed"
            );
            self.state.set_outside_pin(event.pin, event.level);
        }
    }

    /// Returns `true` if the machine is blocked on a `WAIT` that nothing scheduled can release.
    pub fn is_stalled(&self) -> bool {
        let state = &self.state;
        state.current_delay == 0
            && self.pending.is_empty()
            && state
                .wait
                .is_some_and(|condition| condition.blocks(&state.outside_pins))
    }

    /// Advances the simulation by one step and records it in the statistics.
    ///
    /// # Errors
    ///
    /// Propagates the [`PioError`] raised by [`PioState::step`].
    pub fn tick(&mut self) -> Result<CycleTrace, PioError> {
        self.apply_due_pin_events();

        let pc = self.state.instruction_index;
        let trace = self.state.step()?;

        let executed = match trace.event {
            CycleEvent::Delay | CycleEvent::Wait { .. } => None,
            _ => self.state.program().instructions().get(pc),
        };
        self.stats.record(&trace, executed);

        if let CycleEvent::Wait { released: true } = trace.event {
            tracing::debug!(cycle = trace.cycle, "wait released");
        }
        if self.trace {
            tracing::trace!(pc, "{trace}");
        }
        Ok(trace)
    }

    /// Runs until the cycle limit, a stall, or an error; see [`Simulator::run_with`].
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] carrying the failing cycle and the error kind.
    pub fn run(&mut self, limit: Option<u64>) -> Result<RunOutcome, RunError> {
        self.run_with(limit, |_| {})
    }

    /// Runs the program, handing every step's trace to `on_step`.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum cycles to run; falls back to `general.max_cycles` from the config.
    /// * `on_step` - Called with each trace as it is produced.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] carrying the failing cycle and the error kind. The state is left
    /// as it was just before the failing step.
    pub fn run_with<F>(&mut self, limit: Option<u64>, mut on_step: F) -> Result<RunOutcome, RunError>
    where
        F: FnMut(&CycleTrace),
    {
        let limit = limit.or(self.max_cycles);
        let start = self.state.cycle;
        loop {
            let cycles = self.state.cycle - start;
            if let Some(max) = limit
                && cycles >= max
            {
                return Ok(RunOutcome {
                    cycles,
                    reason: StopReason::CycleLimit,
                });
            }
            if self.is_stalled() {
                return Ok(RunOutcome {
                    cycles,
                    reason: StopReason::Stalled,
                });
            }

            match self.tick() {
                Ok(trace) => on_step(&trace),
                Err(kind) => {
                    let cycle = self.state.cycle;
                    tracing::warn!(cycle, error = %kind, "run failed");
                    return Err(RunError { cycle, kind });
                }
            }
        }
    }
}
