//! # Configuration Tests
//!
//! Tests for configuration defaults and JSON deserialization, including
//! partially specified documents.

use piosim_core::common::DEFAULT_MAX_DELAY;
use piosim_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_cycles);
    assert_eq!(config.general.max_cycles, None);
    assert_eq!(config.assembler.max_delay, DEFAULT_MAX_DELAY);
    assert!(config.pins.initial.is_empty());
}

#[test]
fn test_assembler_config_default() {
    assert_eq!(AssemblerConfig::default().max_delay, 32);
    assert!(!AssemblerConfig::default().inline_labels);
}

#[test]
fn test_inline_labels_from_json() {
    let config: Config =
        serde_json::from_str(r#"{ "assembler": { "inline_labels": true } }"#).unwrap();
    assert!(config.assembler.inline_labels);
    assert_eq!(config.assembler.max_delay, 32);
}

#[test]
fn test_empty_json_is_default() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert!(!config.general.trace_cycles);
    assert_eq!(config.general.max_cycles, None);
    assert_eq!(config.assembler.max_delay, 32);
    assert!(config.pins.initial.is_empty());
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let config: Config = serde_json::from_str(r#"{ "general": { "max_cycles": 100 } }"#).unwrap();
    assert_eq!(config.general.max_cycles, Some(100));
    assert!(!config.general.trace_cycles);
    assert_eq!(config.assembler.max_delay, 32);
}

#[test]
fn test_empty_assembler_section_uses_default_delay() {
    let config: Config = serde_json::from_str(r#"{ "assembler": {} }"#).unwrap();
    assert_eq!(config.assembler.max_delay, 32);
}

#[test]
fn test_initial_pins_from_json() {
    let json = r#"{ "pins": { "initial": { "0": true, "3": false, "12": true } } }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    let pins: Vec<(u32, bool)> = config.pins.initial.into_iter().collect();
    assert_eq!(pins, vec![(0, true), (3, false), (12, true)]);
}

#[test]
fn test_invalid_type_is_rejected() {
    let result = serde_json::from_str::<Config>(r#"{ "assembler": { "max_delay": "many" } }"#);
    assert!(result.is_err());
}
