//! Single-Cycle Execution.
//!
//! This module implements the transition function of the state machine. Each call to
//! `step` resolves, in priority order:
//! 1. **Delay:** A pending `[n]` delay is counted down and nothing else happens.
//! 2. **Wait:** A pending `WAIT` condition is re-polled; the instruction is not re-executed.
//! 3. **Fetch:** The decoded line under the program counter is read.
//! 4. **Dispatch:** The instruction runs, its delay is applied, and the program counter moves.

use super::PioState;
use crate::common::PioError;
use crate::core::trace::{CycleEvent, CycleTrace};
use crate::isa::{JmpCondition, Mnemonic, Op};

/// How an instruction left the program counter.
enum Flow {
    /// Fall through to the next line.
    Next(Mnemonic),
    /// A conditional jump was not taken; fall through.
    NotTaken,
    /// A jump was taken; the program counter already points at the target.
    Taken(String),
}

impl PioState {
    /// Advances the simulation by exactly one cycle.
    ///
    /// Label-only, directive, and empty lines are the exception: they are skipped without
    /// consuming a cycle number.
    ///
    /// # Errors
    ///
    /// * [`PioError::ProgramCounterOutOfRange`] if execution ran off the end of the program.
    /// * [`PioError::BufferUnderflow`] if an `OUT` needs more bits than remain.
    ///
    /// Both leave the state exactly as it was before the call.
    pub fn step(&mut self) -> Result<CycleTrace, PioError> {
        if self.current_delay != 0 {
            self.current_delay -= 1;
            return Ok(self.finish_cycle(CycleEvent::Delay));
        }

        if let Some(condition) = self.wait {
            let released = !condition.blocks(&self.outside_pins);
            if released {
                self.wait = None;
            }
            return Ok(self.finish_cycle(CycleEvent::Wait { released }));
        }

        let index = self.instruction_index;
        let len = self.program.len();
        let instruction = self
            .program
            .instructions()
            .get(index)
            .ok_or(PioError::ProgramCounterOutOfRange { index, len })?;

        let flow = match &instruction.op {
            Op::NonInstruction => {
                self.instruction_index += 1;
                return Ok(CycleTrace {
                    cycle: self.cycle,
                    event: CycleEvent::NonInstruction {
                        line: self.program.lines()[index].clone(),
                    },
                });
            }
            Op::SetPins { level } => {
                self.internal_pin = *level;
                Flow::Next(Mnemonic::Set)
            }
            Op::Out { dest, bits } => {
                let value = self.out_buffer.pop_bits(*bits)?;
                self.regs.write(*dest, value);
                Flow::Next(Mnemonic::Out)
            }
            Op::Wait { condition } => {
                self.wait = Some(*condition);
                Flow::Next(Mnemonic::Wait)
            }
            Op::Jmp { condition, target } => {
                let taken = match *condition {
                    JmpCondition::Always => true,
                    // TODO: confirm `!x` polarity on an RP2040 and flip it here if it differs.
                    JmpCondition::Not(reg) => self.regs.read(reg) > 0,
                    JmpCondition::PostDecrement(reg) => {
                        let value = self.regs.read(reg);
                        if value > 0 {
                            self.regs.write(reg, value - 1);
                        }
                        value > 0
                    }
                };
                if taken {
                    self.instruction_index = target.index;
                    Flow::Taken(target.label.clone())
                } else {
                    Flow::NotTaken
                }
            }
            Op::Mov { dest, src } => {
                self.regs.write(*dest, self.regs.read(*src));
                Flow::Next(Mnemonic::Mov)
            }
            Op::Wrap { target } => {
                self.instruction_index = target.index;
                Flow::Next(Mnemonic::Wrap)
            }
        };
        self.current_delay = instruction.delay;

        let event = match flow {
            Flow::Next(mnemonic) => {
                self.instruction_index += 1;
                CycleEvent::Executed(mnemonic)
            }
            Flow::NotTaken => {
                self.instruction_index += 1;
                CycleEvent::JumpNotTaken
            }
            Flow::Taken(label) => CycleEvent::JumpTaken { label },
        };
        Ok(self.finish_cycle(event))
    }

    /// Stamps `event` with the current cycle and advances the counter.
    fn finish_cycle(&mut self, event: CycleEvent) -> CycleTrace {
        let trace = CycleTrace {
            cycle: self.cycle,
            event,
        };
        self.cycle += 1;
        trace
    }
}
