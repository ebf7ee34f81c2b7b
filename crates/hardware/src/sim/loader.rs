//! Program Loader.
//!
//! This module turns program text into a `Program` ready for execution. It performs:
//! 1. **Comment stripping:** Everything from the first `;` on a line is dropped and the rest trimmed.
//! 2. **Label resolution:** `name:` lines and the `.wrap_target` directive map names to line indices.
//! 3. **Decoding:** Each line is decoded into a typed instruction, so malformed lines fail at load time.
//!
//! Every source line keeps its slot, including empty ones, because jumps target indices.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::constants::COMMENT_CHAR;
use crate::common::{LoadError, PioError};
use crate::config::AssemblerConfig;
use crate::isa::Instruction;
use crate::isa::decode::{decode_line, label_of};

/// Mapping from label name to the line index it marks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTable {
    entries: BTreeMap<String, usize>,
}

impl LabelTable {
    /// Collects the labels defined by comment-stripped `lines`.
    ///
    /// A name defined twice maps to its last definition.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let entries = lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| label_of(line.as_ref()).map(|name| (name.to_string(), index)))
            .collect();
        Self { entries }
    }

    /// Looks up a label.
    ///
    /// # Errors
    ///
    /// Returns [`PioError::UnknownLabel`] if the label is not defined.
    pub fn get(&self, label: &str) -> Result<usize, PioError> {
        self.entries
            .get(label)
            .copied()
            .ok_or_else(|| PioError::UnknownLabel(label.to_string()))
    }

    /// Returns `true` if the label is defined.
    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the program defines no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, index)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, &index)| (name.as_str(), index))
    }
}

/// A loaded program: comment-stripped lines, their decoded instructions, and the label table.
///
/// Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    lines: Vec<String>,
    instructions: Vec<Instruction>,
    labels: LabelTable,
}

impl Program {
    /// Splits source text into lines, drops `;` comments, and trims each line.
    pub fn strip_comments(source: &str) -> Vec<String> {
        source
            .split('\n')
            .map(|line| {
                line.split(COMMENT_CHAR)
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string()
            })
            .collect()
    }

    /// Derives the label table of `source`. A pure function of the text.
    pub fn label_table(source: &str) -> LabelTable {
        LabelTable::from_lines(&Self::strip_comments(source))
    }

    /// Loads a program with the default assembler settings.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] naming the first line that fails to decode.
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        Self::parse_with(source, &AssemblerConfig::default())
    }

    /// Loads a program.
    ///
    /// # Arguments
    ///
    /// * `source` - Program text.
    /// * `config` - Assembler settings (delay bound, inline labels).
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] naming the first line that fails to decode.
    pub fn parse_with(source: &str, config: &AssemblerConfig) -> Result<Self, LoadError> {
        let lines = Self::strip_comments(source);
        let labels = LabelTable::from_lines(&lines);
        let instructions = lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                decode_line(line, &labels, config).map_err(|kind| LoadError::new(index, kind))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            lines = lines.len(),
            labels = labels.len(),
            "program loaded"
        );

        Ok(Self {
            lines,
            instructions,
            labels,
        })
    }

    /// The comment-stripped, trimmed source lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The decoded instructions, one per line.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// The label table.
    pub const fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Number of lines (and instruction slots).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` for a program with no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromStr for Program {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Reads program text from disk.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be read.
pub fn read_program(path: impl AsRef<Path>) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Parses a 32-bit word written in decimal, `0x` hex, or `0b` binary, with optional `_` separators.
pub fn parse_word(text: &str) -> Option<u32> {
    let text = text.trim().replace('_', "");
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        u32::from_str_radix(bin, 2).ok()
    } else {
        text.parse().ok()
    }
}
