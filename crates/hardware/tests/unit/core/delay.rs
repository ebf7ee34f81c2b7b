//! # Delay Tests
//!
//! A `[n]` annotation stalls the machine for exactly `n` cycles after the
//! instruction's own effect, without re-executing it.

use crate::common::harness::TestContext;
use piosim_core::core::CycleEvent;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_delay_of_five_takes_five_cycles() {
    let mut ctx = TestContext::new("set pins 1 [5]\nset pins 0", &[]);
    ctx.step_n(7);

    assert_eq!(
        ctx.trace_lines(),
        vec![
            "0: EXEC SET",
            "1: DELAYING",
            "2: DELAYING",
            "3: DELAYING",
            "4: DELAYING",
            "5: DELAYING",
            "6: EXEC SET",
        ]
    );
    assert!(!ctx.state.internal_pin);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(7)]
#[case(32)]
fn test_delay_cycle_count(#[case] delay: u32) {
    let program = format!("set pins 1 [{delay}]\nset pins 0");
    let mut ctx = TestContext::new(&program, &[]);
    ctx.step_n(delay as usize + 2);

    let delays = ctx
        .events()
        .iter()
        .filter(|e| **e == CycleEvent::Delay)
        .count();
    assert_eq!(delays, delay as usize);
    assert_eq!(ctx.state.cycle, u64::from(delay) + 2);
    assert_eq!(ctx.pc(), 2);
}

#[test]
fn test_effect_lands_before_delay() {
    let mut ctx = TestContext::new("set pins 1 [3]\nset pins 0", &[]);
    ctx.step_n(1);
    assert!(ctx.state.internal_pin);
    assert_eq!(ctx.state.current_delay, 3);
    assert_eq!(ctx.pc(), 1);

    ctx.step_n(1);
    assert_eq!(ctx.state.current_delay, 2);
    assert_eq!(ctx.pc(), 1);
}

#[test]
fn test_taken_jump_delays_at_target() {
    let mut ctx = TestContext::new("top:\nset pins 1\njmp top [2]", &[]);
    ctx.step_n(5);
    assert_eq!(
        ctx.trace_lines(),
        vec![
            "NON INSTRUCTION LINE:top:",
            "0: EXEC SET",
            "1: EXEC JMP to top",
            "2: DELAYING",
            "3: DELAYING"
        ]
    );
    assert_eq!(ctx.pc(), 0);
}

#[test]
fn test_wait_counts_down_delay_before_polling() {
    let mut ctx = TestContext::new("wait 0 pin 0 [2]\nset pins 1", &[]);
    ctx.step_n(4);
    assert_eq!(
        ctx.trace_lines(),
        vec!["0: EXEC WAIT", "1: DELAYING", "2: DELAYING", "3: WAITING"]
    );
    assert!(ctx.state.is_waiting());
}
