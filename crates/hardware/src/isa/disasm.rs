//! Instruction Disassembler.
//!
//! Renders a decoded `Instruction` back into canonical lowercase assembler text
//! for program listings, trace output, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use piosim_core::Program;
//!
//! let program: Program = "loop:\nout x, 1\njmp x-- loop [2]".parse().unwrap();
//! let text: Vec<String> = program.instructions().iter().map(ToString::to_string).collect();
//! assert_eq!(text, ["loop:", "out x 1", "jmp x-- loop [2]"]);
//! ```

use std::fmt;

use crate::common::constants::{WRAP, WRAP_TARGET};
use crate::isa::instruction::{Instruction, JmpCondition, Op};

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonInstruction => Ok(()),
            Self::SetPins { level } => write!(f, "set pins {}", u8::from(*level)),
            Self::Out { dest, bits } => write!(f, "out {dest} {bits}"),
            Self::Wait { condition } => write!(
                f,
                "wait {} pin {}",
                u8::from(condition.polarity),
                condition.pin
            ),
            Self::Jmp { condition, target } => match condition {
                JmpCondition::Always => write!(f, "jmp {}", target.label),
                JmpCondition::Not(reg) => write!(f, "jmp !{reg} {}", target.label),
                JmpCondition::PostDecrement(reg) => write!(f, "jmp {reg}-- {}", target.label),
            },
            Self::Mov { dest, src } => write!(f, "mov {dest} {src}"),
            Self::Wrap { .. } => f.write_str(WRAP),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        match self.label.as_deref() {
            Some(WRAP_TARGET) => {
                f.write_str(WRAP_TARGET)?;
                sep = " ";
            }
            Some(name) => {
                write!(f, "{name}:")?;
                sep = " ";
            }
            None => {}
        }
        if self.is_executable() {
            write!(f, "{sep}{}", self.op)?;
        }
        if self.delay > 0 {
            write!(f, " [{}]", self.delay)?;
        }
        Ok(())
    }
}
