//! # Outside Pin and Trace Tests
//!
//! Verifies the outside pin map and the human-readable trace lines.

use piosim_core::PioState;
use piosim_core::core::{CycleEvent, CycleTrace, OutsidePins};
use piosim_core::isa::Mnemonic;
use rstest::rstest;

#[test]
fn test_unset_pins_read_low() {
    let pins = OutsidePins::new();
    assert!(!pins.get(0));
    assert!(!pins.get(31));
    assert_eq!(pins.iter().count(), 0);
}

#[test]
fn test_pins_iterate_in_index_order() {
    let mut pins = OutsidePins::new();
    pins.set(9, true);
    pins.set(2, false);
    pins.set(4, true);
    let levels: Vec<(u32, bool)> = pins.iter().collect();
    assert_eq!(levels, vec![(2, false), (4, true), (9, true)]);
}

#[test]
fn test_state_pin_accessors() {
    let mut state = PioState::load("set pins 1", &[]).unwrap();
    assert!(!state.get_outside_pin(3));
    state.set_outside_pin(3, true);
    assert!(state.get_outside_pin(3));
    state.set_outside_pin(3, false);
    assert!(!state.get_outside_pin(3));
}

#[rstest]
#[case(CycleEvent::Delay, "12: DELAYING")]
#[case(CycleEvent::Wait { released: false }, "12: WAITING")]
#[case(CycleEvent::Wait { released: true }, "12: WAITING")]
#[case(CycleEvent::Executed(Mnemonic::Out), "12: EXEC OUT")]
#[case(CycleEvent::Executed(Mnemonic::Wrap), "12: EXEC .wrap")]
#[case(CycleEvent::JumpTaken { label: "loop".to_string() }, "12: EXEC JMP to loop")]
#[case(CycleEvent::JumpNotTaken, "12: EXEC NO JMP")]
#[case(CycleEvent::NonInstruction { line: "loop:".to_string() }, "NON INSTRUCTION LINE:loop:")]
fn test_trace_display(#[case] event: CycleEvent, #[case] expected: &str) {
    let trace = CycleTrace { cycle: 12, event };
    assert_eq!(trace.to_string(), expected);
}

#[test]
fn test_non_instruction_does_not_consume_cycle() {
    let skipped = CycleTrace {
        cycle: 3,
        event: CycleEvent::NonInstruction {
            line: String::new(),
        },
    };
    let delayed = CycleTrace {
        cycle: 3,
        event: CycleEvent::Delay,
    };
    assert!(!skipped.consumed_cycle());
    assert!(delayed.consumed_cycle());
}
