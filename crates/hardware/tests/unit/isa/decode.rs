//! # Decode Tests
//!
//! Verifies that program lines decode to the right typed operations, that the
//! accepted syntax is as lenient as documented, and that every malformed line
//! is rejected at load time with its line index.

use piosim_core::Program;
use piosim_core::common::{LoadError, PioError, Register};
use piosim_core::config::AssemblerConfig;
use piosim_core::isa::decode::{decode_line, label_of, tokenize};
use piosim_core::isa::{Instruction, JmpCondition, JumpTarget, Op, WaitCondition};
use piosim_core::sim::loader::LabelTable;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn decode(line: &str) -> Result<Instruction, PioError> {
    decode_line(line, &LabelTable::default(), &AssemblerConfig::default())
}

fn inline_labels() -> AssemblerConfig {
    AssemblerConfig {
        inline_labels: true,
        ..AssemblerConfig::default()
    }
}

fn load_error(program: &str) -> LoadError {
    Program::parse(program).unwrap_err()
}

#[test]
fn test_tokenize_treats_commas_as_whitespace() {
    let tokens: Vec<&str> = tokenize("set pins, 1").collect();
    assert_eq!(tokens, vec!["set", "pins", "1"]);
    let tokens: Vec<&str> = tokenize("  mov\tx ,y ").collect();
    assert_eq!(tokens, vec!["mov", "x", "y"]);
}

#[rstest]
#[case("loop:", Some("loop"))]
#[case("loop: out x 1", Some("loop"))]
#[case(".wrap_target", Some(".wrap_target"))]
#[case(".WRAP_TARGET", Some(".wrap_target"))]
#[case(":", None)]
#[case("set pins 1", None)]
#[case(".wrap", None)]
#[case("", None)]
fn test_label_of(#[case] line: &str, #[case] expected: Option<&str>) {
    assert_eq!(label_of(line), expected);
}

#[rstest]
#[case("set pins 1", Op::SetPins { level: true })]
#[case("SET PINS, 0", Op::SetPins { level: false })]
#[case("out x 1", Op::Out { dest: Register::X, bits: 1 })]
#[case("OUT Y, 32", Op::Out { dest: Register::Y, bits: 32 })]
#[case("wait 0 pin 3", Op::Wait { condition: WaitCondition { polarity: false, pin: 3 } })]
#[case("Wait 1 PIN 17", Op::Wait { condition: WaitCondition { polarity: true, pin: 17 } })]
#[case("mov x y", Op::Mov { dest: Register::X, src: Register::Y })]
#[case("MOV Y, X", Op::Mov { dest: Register::Y, src: Register::X })]
fn test_decode_operations(#[case] line: &str, #[case] expected: Op) {
    let instruction = decode(line).unwrap();
    assert_eq!(instruction.op, expected);
    assert_eq!(instruction.delay, 0);
    assert_eq!(instruction.label, None);
}

#[test]
fn test_decode_delay_annotation() {
    let instruction = decode("set pins 1 [7]").unwrap();
    assert_eq!(instruction.op, Op::SetPins { level: true });
    assert_eq!(instruction.delay, 7);

    let instruction = decode("out x 4 [ 2 ]").unwrap();
    assert_eq!(instruction.delay, 2);
}

#[test]
fn test_jump_targets_resolve_at_load() {
    let program: Program = "start:\nset pins 1\njmp start\njmp !y start\njmp x-- start"
        .parse()
        .unwrap();
    let target = JumpTarget {
        label: "start".to_string(),
        index: 0,
    };
    let ops: Vec<&Op> = program.instructions()[2..].iter().map(|i| &i.op).collect();
    assert_eq!(
        ops,
        vec![
            &Op::Jmp {
                condition: JmpCondition::Always,
                target: target.clone()
            },
            &Op::Jmp {
                condition: JmpCondition::Not(Register::Y),
                target: target.clone()
            },
            &Op::Jmp {
                condition: JmpCondition::PostDecrement(Register::X),
                target
            },
        ]
    );
}

#[rstest]
#[case::name("loop: out x 1 [3]", "loop")]
#[case::wrap_target(".wrap_target out x 1 [3]", ".wrap_target")]
fn test_label_line_ignores_trailing_instruction(#[case] line: &str, #[case] label: &str) {
    let instruction = decode(line).unwrap();
    assert_eq!(instruction, Instruction::non_instruction(Some(label.to_string())));
}

#[test]
fn test_label_line_skips_delay_bound_check() {
    assert!(!decode("loop: set pins 1 [99]").unwrap().is_executable());
}

#[rstest]
#[case::name("loop: out x 1 [3]", "loop")]
#[case::wrap_target(".wrap_target out x 1 [3]", ".wrap_target")]
fn test_inline_label_shares_line_with_instruction(#[case] line: &str, #[case] label: &str) {
    let instruction = decode_line(line, &LabelTable::default(), &inline_labels()).unwrap();
    assert_eq!(instruction.label.as_deref(), Some(label));
    assert_eq!(
        instruction.op,
        Op::Out {
            dest: Register::X,
            bits: 1
        }
    );
    assert_eq!(instruction.delay, 3);
}

#[test]
fn test_inline_label_still_checks_operands() {
    let err = Program::parse_with("loop: out q 1", &inline_labels()).unwrap_err();
    assert_eq!(err, LoadError::new(0, PioError::UnknownRegister("q".to_string())));
    assert!(Program::parse("loop: out q 1").is_ok());
}

#[rstest]
#[case("")]
#[case("loop:")]
#[case(".wrap_target")]
#[case(".program tx")]
#[case(".side_set 1 opt")]
fn test_non_instruction_lines(#[case] line: &str) {
    assert!(!decode(line).unwrap().is_executable());
}

#[test]
fn test_wrap_resolves_wrap_target() {
    let program: Program = "set pins 0\n.wrap_target\nset pins 1\n.wrap".parse().unwrap();
    assert_eq!(
        program.instructions()[3].op,
        Op::Wrap {
            target: JumpTarget {
                label: ".wrap_target".to_string(),
                index: 1
            }
        }
    );
}

#[rstest]
#[case::set_value("set pins 2", PioError::InvalidOperand { mnemonic: "SET", operand: "2".to_string() })]
#[case::set_dest("set x 1", PioError::InvalidOperand { mnemonic: "SET", operand: "x".to_string() })]
#[case::out_register("out z 1", PioError::UnknownRegister("z".to_string()))]
#[case::out_too_wide("out x 33", PioError::InvalidOperand { mnemonic: "OUT", operand: "33".to_string() })]
#[case::out_zero("out x 0", PioError::InvalidOperand { mnemonic: "OUT", operand: "0".to_string() })]
#[case::wait_source("wait 0 gpio 3", PioError::InvalidOperand { mnemonic: "WAIT", operand: "gpio".to_string() })]
#[case::wait_polarity("wait 2 pin 3", PioError::InvalidOperand { mnemonic: "WAIT", operand: "2".to_string() })]
#[case::jmp_label("jmp nowhere", PioError::UnknownLabel("nowhere".to_string()))]
#[case::jmp_condition_register("jmp !q nowhere", PioError::UnknownRegister("q".to_string()))]
#[case::mov_register("mov x pins", PioError::UnknownRegister("pins".to_string()))]
#[case::mov_arity("mov x", PioError::MalformedInstruction("mov x".to_string()))]
#[case::unknown_mnemonic("frob x", PioError::MalformedInstruction("frob x".to_string()))]
#[case::delay_too_long("set pins 1 [33]", PioError::DelayOutOfRange { delay: 33, max: 32 })]
#[case::delay_not_a_number("set pins 1 [n]", PioError::InvalidOperand { mnemonic: "delay", operand: "n".to_string() })]
#[case::delay_unclosed("set pins 1 [2", PioError::MalformedInstruction("set pins 1 [2".to_string()))]
#[case::delay_on_label("loop: [2]", PioError::InvalidOperand { mnemonic: "label", operand: "loop".to_string() })]
#[case::delay_on_directive(".program tx [1]", PioError::InvalidOperand { mnemonic: "directive", operand: ".program".to_string() })]
#[case::wrap_without_target(".wrap", PioError::UnknownLabel(".wrap_target".to_string()))]
fn test_malformed_lines_fail_to_load(#[case] program: &str, #[case] expected: PioError) {
    assert_eq!(load_error(program), LoadError::new(0, expected));
}

#[test]
fn test_jmp_condition_must_be_not_or_decrement() {
    let err = load_error("loop:\njmp x!=y loop");
    assert_eq!(
        err,
        LoadError::new(
            1,
            PioError::InvalidOperand {
                mnemonic: "JMP",
                operand: "x!=y".to_string()
            }
        )
    );
}

#[test]
fn test_load_error_reports_first_bad_line() {
    let err = load_error("set pins 1\n\nout q 3\nout r 3");
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, PioError::UnknownRegister("q".to_string()));
}

#[test]
fn test_labels_are_case_sensitive() {
    let err = load_error("Loop:\njmp loop");
    assert_eq!(err.kind, PioError::UnknownLabel("loop".to_string()));
}

#[test]
fn test_custom_delay_bound() {
    let labels = LabelTable::default();
    let config = AssemblerConfig {
        max_delay: 3,
        ..AssemblerConfig::default()
    };
    assert_eq!(decode_line("set pins 1 [3]", &labels, &config).unwrap().delay, 3);
    assert_eq!(
        decode_line("set pins 1 [4]", &labels, &config),
        Err(PioError::DelayOutOfRange { delay: 4, max: 3 })
    );
}
