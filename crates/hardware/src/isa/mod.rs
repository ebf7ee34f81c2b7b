//! Instruction Set Definitions.
//!
//! Contains the typed instruction model for the five supported PIO operations
//! (`SET pins`, `OUT`, `WAIT pin`, `JMP`, `MOV`) and the `.wrap` directive,
//! the decoder that produces it from program text, and the disassembler that
//! renders it back.

/// Line decoding from assembler text to typed instructions.
pub mod decode;

/// Instruction disassembler for listings and diagnostics.
pub mod disasm;

/// Instruction, operation, and operand types.
pub mod instruction;

pub use instruction::{Instruction, JmpCondition, JumpTarget, Mnemonic, Op, WaitCondition};
