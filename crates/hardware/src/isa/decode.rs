//! PIO Line Decoder.
//!
//! This module turns one comment-stripped program line into a typed `Instruction`.
//! It handles:
//! 1. **Tokenizing:** Whitespace and commas both separate operands, so `set pins, 1` is accepted.
//! 2. **Labels:** A leading `name:` or `.wrap_target` token. Text after it is only decoded when
//!    inline labels are enabled; otherwise the line just defines the label.
//! 3. **Delays:** A trailing `[n]` annotation, bounded by the configured maximum.
//! 4. **Operands:** Registers, pin levels, bit counts, and jump targets, resolved against the label table.

use crate::common::constants::{DIRECTIVE_PREFIX, LABEL_SUFFIX, WORD_BITS, WRAP, WRAP_TARGET};
use crate::common::{PioError, Register};
use crate::config::AssemblerConfig;
use crate::isa::instruction::{Instruction, JmpCondition, JumpTarget, Op, WaitCondition};
use crate::sim::loader::LabelTable;

/// Splits a line into operand tokens, treating commas as whitespace.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

/// Returns the label a line defines, if its first token is `name:` or `.wrap_target`.
pub fn label_of(line: &str) -> Option<&str> {
    let first = tokenize(line).next()?;
    if first.eq_ignore_ascii_case(WRAP_TARGET) {
        return Some(WRAP_TARGET);
    }
    first
        .strip_suffix(LABEL_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// Separates the `[n]` delay annotation from the rest of the line.
///
/// Returns the line text before the annotation and the parsed delay, if present.
fn split_delay(line: &str) -> Result<(&str, Option<u32>), PioError> {
    let Some((body, rest)) = line.split_once('[') else {
        return Ok((line, None));
    };
    let malformed = || PioError::MalformedInstruction(line.to_string());
    let (inner, trailing) = rest.split_once(']').ok_or_else(malformed)?;
    if !trailing.trim().is_empty() {
        return Err(malformed());
    }
    let inner = inner.trim();
    let delay = inner.parse::<u32>().map_err(|_| PioError::InvalidOperand {
        mnemonic: "delay",
        operand: inner.to_string(),
    })?;
    Ok((body, Some(delay)))
}

/// Parses a `0`/`1` operand.
fn parse_level(mnemonic: &'static str, operand: &str) -> Result<bool, PioError> {
    match operand {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(PioError::InvalidOperand {
            mnemonic,
            operand: operand.to_string(),
        }),
    }
}

/// Parses the condition token of a two-operand `JMP`.
fn parse_jmp_condition(token: &str) -> Result<JmpCondition, PioError> {
    if let Some(reg) = token.strip_prefix('!') {
        return Ok(JmpCondition::Not(reg.parse()?));
    }
    if let Some(reg) = token.strip_suffix("--").or_else(|| token.strip_suffix('-')) {
        return Ok(JmpCondition::PostDecrement(reg.parse()?));
    }
    Err(PioError::InvalidOperand {
        mnemonic: "JMP",
        operand: token.to_string(),
    })
}

/// Looks up a jump target in the label table.
fn resolve(labels: &LabelTable, label: &str) -> Result<JumpTarget, PioError> {
    Ok(JumpTarget {
        label: label.to_string(),
        index: labels.get(label)?,
    })
}

/// Decodes the operation named by `mnemonic` with its `operands`.
fn decode_op(
    line: &str,
    mnemonic: &str,
    operands: &[&str],
    labels: &LabelTable,
) -> Result<Op, PioError> {
    let malformed = || PioError::MalformedInstruction(line.to_string());

    match mnemonic.to_ascii_lowercase().as_str() {
        "set" => {
            let [dest, value] = operands else {
                return Err(malformed());
            };
            if !dest.eq_ignore_ascii_case("pins") {
                return Err(PioError::InvalidOperand {
                    mnemonic: "SET",
                    operand: (*dest).to_string(),
                });
            }
            Ok(Op::SetPins {
                level: parse_level("SET", value)?,
            })
        }
        "out" => {
            let [dest, bits] = operands else {
                return Err(malformed());
            };
            let dest: Register = dest.parse()?;
            let bits = bits
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=WORD_BITS).contains(n))
                .ok_or_else(|| PioError::InvalidOperand {
                    mnemonic: "OUT",
                    operand: (*bits).to_string(),
                })?;
            Ok(Op::Out { dest, bits })
        }
        "wait" => {
            let [polarity, source, pin] = operands else {
                return Err(malformed());
            };
            let polarity = parse_level("WAIT", polarity)?;
            if !source.eq_ignore_ascii_case("pin") {
                return Err(PioError::InvalidOperand {
                    mnemonic: "WAIT",
                    operand: (*source).to_string(),
                });
            }
            let pin = pin.parse::<u32>().map_err(|_| PioError::InvalidOperand {
                mnemonic: "WAIT",
                operand: (*pin).to_string(),
            })?;
            Ok(Op::Wait {
                condition: WaitCondition { polarity, pin },
            })
        }
        "jmp" => match operands {
            [label] => Ok(Op::Jmp {
                condition: JmpCondition::Always,
                target: resolve(labels, label)?,
            }),
            [condition, label] => Ok(Op::Jmp {
                condition: parse_jmp_condition(condition)?,
                target: resolve(labels, label)?,
            }),
            _ => Err(malformed()),
        },
        "mov" => {
            let [dest, src] = operands else {
                return Err(malformed());
            };
            Ok(Op::Mov {
                dest: dest.parse()?,
                src: src.parse()?,
            })
        }
        _ => Err(malformed()),
    }
}

/// Decodes one comment-stripped line.
///
/// # Arguments
///
/// * `line` - The line text, comments already removed.
/// * `labels` - Label table of the whole program, used to resolve jump targets.
/// * `config` - Delay bound and whether instructions may follow a label on its line.
///
/// # Returns
///
/// The decoded instruction, or the reason the line cannot be executed.
pub fn decode_line(
    line: &str,
    labels: &LabelTable,
    config: &AssemblerConfig,
) -> Result<Instruction, PioError> {
    let (body, delay) = split_delay(line)?;

    let mut tokens: Vec<&str> = tokenize(body).collect();
    let label = label_of(body).map(str::to_string);

    // The label token is never part of the instruction that may follow it.
    if label.is_some() {
        let _ = tokens.remove(0);
        if !tokens.is_empty() && !config.inline_labels {
            return Ok(Instruction::non_instruction(label));
        }
    }

    if let Some(delay) = delay
        && delay > config.max_delay
    {
        return Err(PioError::DelayOutOfRange {
            delay,
            max: config.max_delay,
        });
    }

    let Some((&first, operands)) = tokens.split_first() else {
        return match (delay, &label) {
            (None, _) => Ok(Instruction::non_instruction(label)),
            (Some(_), Some(name)) => Err(PioError::InvalidOperand {
                mnemonic: "label",
                operand: name.clone(),
            }),
            (Some(_), None) => Err(PioError::MalformedInstruction(line.to_string())),
        };
    };

    if first.starts_with(DIRECTIVE_PREFIX) {
        if delay.is_some() {
            return Err(PioError::InvalidOperand {
                mnemonic: "directive",
                operand: first.to_string(),
            });
        }
        if !first.eq_ignore_ascii_case(WRAP) {
            return Ok(Instruction::non_instruction(label));
        }
        if !operands.is_empty() {
            return Err(PioError::MalformedInstruction(line.to_string()));
        }
        return Ok(Instruction {
            label,
            op: Op::Wrap {
                target: resolve(labels, WRAP_TARGET)?,
            },
            delay: 0,
        });
    }

    Ok(Instruction {
        label,
        op: decode_op(line, first, operands, labels)?,
        delay: delay.unwrap_or(0),
    })
}
