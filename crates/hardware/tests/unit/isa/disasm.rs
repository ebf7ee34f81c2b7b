//! # Disassembly Tests
//!
//! Verifies the canonical lowercase rendering of decoded lines, and that the
//! rendering of a program assembles back to the same operations.

use piosim_core::Program;
use piosim_core::config::AssemblerConfig;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn listing(source: &str) -> Vec<String> {
    let program: Program = source.parse().unwrap();
    program
        .instructions()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[rstest]
#[case("SET PINS, 1 [3]", "set pins 1 [3]")]
#[case("out X, 8", "out x 8")]
#[case("Wait 1 Pin 7", "wait 1 pin 7")]
#[case("MOV y x", "mov y x")]
#[case("jmp X- end\nend:", "jmp x-- end")]
#[case("jmp !Y end\nend:", "jmp !y end")]
#[case("  set pins 0   ; comment", "set pins 0")]
fn test_canonical_form(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(listing(source)[0], expected);
}

#[test]
fn test_labels_and_directives() {
    let source = ".program blink\n.wrap_target\nloop: set pins 1 [2]\njmp loop\n\n.wrap";
    assert_eq!(
        listing(source),
        vec![
            "",
            ".wrap_target",
            "loop:",
            "jmp loop",
            "",
            ".wrap",
        ]
    );
}

#[test]
fn test_inline_label_listing() {
    let config = AssemblerConfig {
        inline_labels: true,
        ..AssemblerConfig::default()
    };
    let program = Program::parse_with("loop: SET pins, 1 [2]\njmp loop", &config).unwrap();
    let text: Vec<String> = program
        .instructions()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(text, vec!["loop: set pins 1 [2]", "jmp loop"]);

    let reparsed = Program::parse_with(&text.join("\n"), &config).unwrap();
    assert_eq!(reparsed.instructions(), program.instructions());
}

#[test]
fn test_listing_reassembles_to_same_program() {
    let source = "start:\nOUT x, 4\n.wrap_target\nwait 0 pin 2 [1]\njmp !X start\nbody: mov y, x\njmp y- body\n.wrap";
    let original: Program = source.parse().unwrap();
    let rendered = listing(source).join("\n");
    let reparsed: Program = rendered.parse().unwrap();

    assert_eq!(reparsed.instructions(), original.instructions());
    assert_eq!(reparsed.labels(), original.labels());
}
