//! Simulator error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Error Kinds:** Every way a program can fail to decode or to execute.
//! 2. **Load Errors:** A kind tagged with the source line that produced it.
//! 3. **Run Errors:** A kind tagged with the cycle at which the run failed.
//!
//! None of these errors are recovered internally. They abort the current step and
//! propagate unchanged to whoever drives the simulation.

use thiserror::Error;

/// Every failure the loader or the execution engine can report.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PioError {
    /// The line is not a label, a directive, or a recognized mnemonic,
    /// or its operands do not have the shape the mnemonic expects.
    #[error("malformed instruction `{0}`")]
    MalformedInstruction(String),

    /// An `OUT` asked for more bits than remain in the out buffer.
    ///
    /// Raised before any bit is consumed, so registers and the buffer are untouched.
    #[error("out buffer underflow: OUT requested {requested} bits but {available} remain")]
    BufferUnderflow {
        /// Bits the instruction asked for.
        requested: u32,
        /// Bits left in the buffer.
        available: usize,
    },

    /// A `JMP` or `.wrap` names a label that is not in the label table.
    #[error("unknown label `{0}`")]
    UnknownLabel(String),

    /// An operand names something other than `x` or `y`.
    #[error("unknown register `{0}`")]
    UnknownRegister(String),

    /// An operand has the wrong value, e.g. `SET pins 2` or `JMP x!=y label`.
    #[error("invalid operand `{operand}` for {mnemonic}")]
    InvalidOperand {
        /// Mnemonic (or directive) the operand belongs to.
        mnemonic: &'static str,
        /// The offending operand text.
        operand: String,
    },

    /// A `[n]` annotation exceeds the configured maximum delay.
    #[error("delay {delay} exceeds the maximum of {max}")]
    DelayOutOfRange {
        /// Requested delay in cycles.
        delay: u32,
        /// Largest delay allowed.
        max: u32,
    },

    /// The program counter ran past the last line of a program without a wrap.
    #[error("program counter {index} is outside a program of {len} lines")]
    ProgramCounterOutOfRange {
        /// Program counter at fetch time.
        index: usize,
        /// Number of lines in the program.
        len: usize,
    },
}

/// A failure to load a program, tagged with the 0-based line index that caused it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct LoadError {
    /// Index of the offending line (the same index jumps use).
    pub line: usize,
    /// What went wrong.
    #[source]
    pub kind: PioError,
}

impl LoadError {
    /// Tags an error kind with the line it came from.
    pub const fn new(line: usize, kind: PioError) -> Self {
        Self { line, kind }
    }
}

/// A failed run: the error kind and the cycle at which it occurred.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("run failed at cycle {cycle}: {kind}")]
pub struct RunError {
    /// Value of the cycle counter when the failing step was attempted.
    pub cycle: u64,
    /// What went wrong.
    #[source]
    pub kind: PioError,
}
