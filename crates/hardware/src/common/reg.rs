//! Scratch Register File.
//!
//! This module provides the two 32-bit scratch registers of a PIO state machine. It provides:
//! 1. **Naming:** The `Register` enum and its parse from operand text.
//! 2. **Storage:** `RegisterFile`, read and written by `OUT`, `MOV`, and decrementing `JMP`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PioError;

/// One of the two scratch registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    /// Scratch register `x`.
    X,
    /// Scratch register `y`.
    Y,
}

impl Register {
    /// Lowercase assembler name of the register.
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

impl FromStr for Register {
    type Err = PioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            _ => Err(PioError::UnknownRegister(s.to_string())),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The `x` and `y` scratch registers, both reset to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterFile {
    /// Scratch register `x`.
    pub x: u32,
    /// Scratch register `y`.
    pub y: u32,
}

impl RegisterFile {
    /// Creates a register file with both registers at zero.
    pub const fn new() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Reads a register.
    #[inline]
    pub const fn read(&self, reg: Register) -> u32 {
        match reg {
            Register::X => self.x,
            Register::Y => self.y,
        }
    }

    /// Writes a register.
    #[inline]
    pub const fn write(&mut self, reg: Register, val: u32) {
        match reg {
            Register::X => self.x = val,
            Register::Y => self.y = val,
        }
    }

    /// Dumps both registers to stdout.
    pub fn dump(&self) {
        println!("x={:#010x} ({})  y={:#010x} ({})", self.x, self.x, self.y, self.y);
    }
}
