//! PIO State Machine Definition.
//!
//! This module defines `PioState`, the only mutable entity in a simulated run. It holds:
//! 1. **Program:** The loaded, decoded program and its label table.
//! 2. **Registers:** The `x`/`y` scratch registers and the program counter.
//! 3. **Timing:** The pending `[n]` delay, the active `WAIT` condition, and the cycle counter.
//! 4. **I/O:** The output pin, the out buffer, and the outside pins.
//!
//! A state is created once per run, mutated only by [`PioState::step`] and the
//! outside-pin setter, and dropped by the caller when the run ends.

/// Single-cycle step and instruction handlers.
pub mod execution;

use serde::{Deserialize, Serialize};

use crate::common::{LoadError, RegisterFile};
use crate::core::pins::OutsidePins;
use crate::isa::WaitCondition;
use crate::sim::loader::Program;
use crate::soc::OutBuffer;

/// Architectural state of one PIO state machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PioState {
    program: Program,
    /// Scratch registers `x` and `y`.
    pub regs: RegisterFile,
    /// Index of the next line to execute.
    pub instruction_index: usize,
    /// Cycles left before the next instruction may execute.
    pub current_delay: u32,
    /// Level last written by `SET pins`.
    pub internal_pin: bool,
    /// Bits staged for `OUT`.
    pub out_buffer: OutBuffer,
    /// External levels pollable with `WAIT`.
    pub outside_pins: OutsidePins,
    /// Condition the machine is blocked on, if any.
    pub wait: Option<WaitCondition>,
    /// Cycles elapsed since the run started.
    pub cycle: u64,
}

impl PioState {
    /// Creates a reset state for `program`, with `out_buffer` staged for `OUT`.
    pub fn new(program: Program, out_buffer: OutBuffer) -> Self {
        Self {
            program,
            regs: RegisterFile::new(),
            instruction_index: 0,
            current_delay: 0,
            internal_pin: false,
            out_buffer,
            outside_pins: OutsidePins::new(),
            wait: None,
            cycle: 0,
        }
    }

    /// Loads program text and stages `words` in the out buffer.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] naming the first line that fails to decode.
    pub fn load(source: &str, words: &[u32]) -> Result<Self, LoadError> {
        let program = Program::parse(source)?;
        Ok(Self::new(program, OutBuffer::from_words(words)))
    }

    /// The program being executed.
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// Value of scratch register `x`.
    pub const fn x(&self) -> u32 {
        self.regs.x
    }

    /// Value of scratch register `y`.
    pub const fn y(&self) -> u32 {
        self.regs.y
    }

    /// Returns `true` while a `WAIT` condition is pending.
    pub const fn is_waiting(&self) -> bool {
        self.wait.is_some()
    }

    /// Reads an outside pin; pins never set read low.
    pub fn get_outside_pin(&self, pin: u32) -> bool {
        self.outside_pins.get(pin)
    }

    /// Drives an outside pin, e.g. to release a `WAIT` between steps.
    pub fn set_outside_pin(&mut self, pin: u32, level: bool) {
        self.outside_pins.set(pin, level);
    }

    /// Dumps the architectural state to stdout.
    pub fn dump_state(&self) {
        println!(
            "cycle={} pc={} delay={} pin={}",
            self.cycle,
            self.instruction_index,
            self.current_delay,
            u8::from(self.internal_pin)
        );
        self.regs.dump();
        println!("out_buffer: {} bits remaining", self.out_buffer.len());
        if let Some(condition) = self.wait {
            println!(
                "waiting: pin {} (blocks while {})",
                condition.pin,
                u8::from(condition.polarity)
            );
        }
        for (pin, level) in self.outside_pins.iter() {
            println!("outside pin {pin} = {}", u8::from(level));
        }
    }
}
