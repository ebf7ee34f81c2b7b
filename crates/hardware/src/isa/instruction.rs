//! Typed PIO instructions.
//!
//! Provides the closed set of operations a program line can decode to, along with
//! the operand types they carry. Decoding happens once at load time, so the execution
//! engine never re-parses text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::Register;
use crate::core::pins::OutsidePins;

/// Mnemonic of an executable instruction, used for traces and statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mnemonic {
    /// `SET pins <0|1>`
    Set,
    /// `OUT <reg> <bits>`
    Out,
    /// `WAIT <0|1> pin <idx>`
    Wait,
    /// `JMP [cond] <label>`
    Jmp,
    /// `MOV <to> <from>`
    Mov,
    /// `.wrap`
    Wrap,
}

impl Mnemonic {
    /// Upper-case name as it appears in cycle traces.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Set => "SET",
            Self::Out => "OUT",
            Self::Wait => "WAIT",
            Self::Jmp => "JMP",
            Self::Mov => "MOV",
            Self::Wrap => ".wrap",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A jump destination, resolved against the label table at load time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpTarget {
    /// Label name as written in the program.
    pub label: String,
    /// Line index the label points at.
    pub index: usize,
}

/// Condition under which a `JMP` is taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JmpCondition {
    /// `JMP label`: always taken.
    Always,
    /// `JMP !reg label`: taken when the register is greater than zero.
    ///
    /// The RP2040 reads `!x` as "jump if zero"; this is the inverse.
    Not(Register),
    /// `JMP reg-- label`: when the register is greater than zero, decrement it and jump.
    ///
    /// At zero the register is left alone and the jump falls through. Real hardware
    /// still jumps and wraps to `0xFFFF_FFFF` in that case.
    PostDecrement(Register),
}

/// Pin condition a `WAIT` blocks on.
///
/// Plain data rather than a closure, so machine state stays serializable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitCondition {
    /// `false` for `WAIT 0`, `true` for `WAIT 1`.
    pub polarity: bool,
    /// Outside pin being polled.
    pub pin: u32,
}

impl WaitCondition {
    /// Returns `true` while the condition keeps the machine waiting.
    ///
    /// Polarity `0` blocks while the pin reads low and polarity `1` blocks while it reads high.
    pub fn blocks(&self, pins: &OutsidePins) -> bool {
        pins.get(self.pin) == self.polarity
    }
}

/// The operation a program line decodes to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Label-only, directive, or empty line. Occupies an index but does no work.
    NonInstruction,
    /// Drive the state machine's output pin.
    SetPins {
        /// New pin level.
        level: bool,
    },
    /// Shift bits out of the out buffer into a register.
    Out {
        /// Destination register.
        dest: Register,
        /// Number of bits to shift, 1 to 32.
        bits: u32,
    },
    /// Block until an outside pin changes.
    Wait {
        /// The pin condition to poll.
        condition: WaitCondition,
    },
    /// Conditional or unconditional jump.
    Jmp {
        /// When to take the jump.
        condition: JmpCondition,
        /// Where to go.
        target: JumpTarget,
    },
    /// Register-to-register copy.
    Mov {
        /// Destination register.
        dest: Register,
        /// Source register.
        src: Register,
    },
    /// Jump to the `.wrap_target` label.
    Wrap {
        /// The resolved `.wrap_target` position.
        target: JumpTarget,
    },
}

impl Op {
    /// Mnemonic of the operation, or `None` for a non-instruction line.
    pub const fn mnemonic(&self) -> Option<Mnemonic> {
        match self {
            Self::NonInstruction => None,
            Self::SetPins { .. } => Some(Mnemonic::Set),
            Self::Out { .. } => Some(Mnemonic::Out),
            Self::Wait { .. } => Some(Mnemonic::Wait),
            Self::Jmp { .. } => Some(Mnemonic::Jmp),
            Self::Mov { .. } => Some(Mnemonic::Mov),
            Self::Wrap { .. } => Some(Mnemonic::Wrap),
        }
    }
}

/// One decoded program line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Label defined by this line, if any.
    pub label: Option<String>,
    /// The operation to perform.
    pub op: Op,
    /// Cycles to stall after the operation executes (the `[n]` annotation).
    pub delay: u32,
}

impl Instruction {
    /// A line that does no work.
    pub const fn non_instruction(label: Option<String>) -> Self {
        Self {
            label,
            op: Op::NonInstruction,
            delay: 0,
        }
    }

    /// Returns `true` if executing this line consumes a cycle.
    pub const fn is_executable(&self) -> bool {
        !matches!(self.op, Op::NonInstruction)
    }
}
