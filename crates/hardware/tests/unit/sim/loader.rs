//! # Loader Tests
//!
//! Verifies comment stripping, label table derivation, and out-buffer word parsing.

use piosim_core::Program;
use piosim_core::common::PioError;
use piosim_core::sim::loader::{LabelTable, parse_word};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[test]
fn test_strip_comments_keeps_every_slot() {
    let lines = Program::strip_comments("set pins 1 ; high\n   ; only a comment\n  mov x y  \n");
    assert_eq!(lines, vec!["set pins 1", "", "mov x y", ""]);
}

#[test]
fn test_label_table_indices() {
    let table = Program::label_table("start:\nset pins 1\n.wrap_target\nloop: out x 1\njmp loop");
    let entries: Vec<(&str, usize)> = table.iter().collect();
    assert_eq!(entries, vec![(".wrap_target", 2), ("loop", 3), ("start", 0)]);
    assert_eq!(table.len(), 3);
    assert!(table.contains("loop"));
    assert!(!table.contains("Loop"));
}

#[test]
fn test_label_in_comment_is_ignored() {
    let table = Program::label_table("; loop:\nset pins 1");
    assert!(table.is_empty());
}

#[test]
fn test_duplicate_label_last_wins() {
    let table = Program::label_table("again:\nset pins 1\nagain:\nset pins 0");
    assert_eq!(table.get("again"), Ok(2));
}

#[test]
fn test_missing_label_lookup() {
    let table = LabelTable::default();
    assert_eq!(
        table.get("missing"),
        Err(PioError::UnknownLabel("missing".to_string()))
    );
}

#[test]
fn test_program_keeps_lines_and_instructions_aligned() {
    let program: Program = "top:\n  out x 1 ; shift\n\njmp top".parse().unwrap();
    assert_eq!(program.len(), 4);
    assert_eq!(program.lines(), &["top:", "out x 1", "", "jmp top"]);
    assert_eq!(program.instructions().len(), program.len());
    assert_eq!(program.labels().get("top"), Ok(0));
}

#[test]
fn test_empty_source_is_one_empty_line() {
    let program: Program = "".parse().unwrap();
    assert_eq!(program.len(), 1);
    assert!(!program.instructions()[0].is_executable());
}

#[rstest]
#[case("42", Some(42))]
#[case("0xAB", Some(0xAB))]
#[case("0XdeadBEEF", Some(0xDEAD_BEEF))]
#[case("0b1010", Some(10))]
#[case("0xFFFF_FFFF", Some(u32::MAX))]
#[case(" 7 ", Some(7))]
#[case("0x1_0000_0000", None)]
#[case("-1", None)]
#[case("ten", None)]
fn test_parse_word(#[case] text: &str, #[case] expected: Option<u32>) {
    assert_eq!(parse_word(text), expected);
}

fn program_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}:",
        Just(".wrap_target".to_string()),
        Just("set pins 1".to_string()),
        Just("mov x y".to_string()),
        Just(String::new()),
        "[a-z]{1,6}: set pins 0",
        "; [a-z:]{0,8}",
    ]
}

proptest! {
    /// Deriving the label table twice from the same text gives the same table,
    /// and every entry points at a line that defines it.
    #[test]
    fn prop_label_table_is_pure(lines in prop::collection::vec(program_line(), 0..12)) {
        let source = lines.join("\n");
        let first = Program::label_table(&source);
        let second = Program::label_table(&source);
        prop_assert_eq!(&first, &second);

        let stripped = Program::strip_comments(&source);
        for (name, index) in first.iter() {
            prop_assert!(index < stripped.len());
            let line = &stripped[index];
            let label_prefix = format!("{name}:");
            prop_assert!(line == name || line.starts_with(&label_prefix));
        }
    }
}
