//! Configuration system for the PIO simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline constants (delay bound, tracing off, no cycle limit).
//! 2. **Structures:** Hierarchical config for general run settings, the assembler, and outside pins.
//!
//! Configuration is supplied as JSON (CLI `--config`, Python dicts) or built with `Config::default()`.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Default configuration constants for the simulator.
mod defaults {
    /// Largest accepted `[n]` delay annotation.
    pub const MAX_DELAY: u32 = crate::common::DEFAULT_MAX_DELAY;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use piosim_core::config::Config;
///
/// let config = Config::default();
/// assert!(!config.general.trace_cycles);
/// assert_eq!(config.assembler.max_delay, 32);
/// assert!(!config.assembler.inline_labels);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use piosim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_cycles": true, "max_cycles": 5000 },
///     "assembler": { "max_delay": 31, "inline_labels": true },
///     "pins": { "initial": { "3": true } }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert!(config.general.trace_cycles);
/// assert_eq!(config.general.max_cycles, Some(5000));
/// assert_eq!(config.assembler.max_delay, 31);
/// assert!(config.assembler.inline_labels);
/// assert_eq!(config.pins.initial.get(&3), Some(&true));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General run settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Assembler settings.
    #[serde(default)]
    pub assembler: AssemblerConfig,
    /// Outside pin settings.
    #[serde(default)]
    pub pins: PinConfig,
}

/// General run settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `tracing` event for every cycle.
    #[serde(default)]
    pub trace_cycles: bool,

    /// Cycle limit for `Simulator::run`. `None` runs until the program stops or fails.
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

/// Assembler settings applied when a program is loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct AssemblerConfig {
    /// Largest `[n]` delay annotation accepted; larger values fail to load.
    #[serde(default = "AssemblerConfig::default_max_delay")]
    pub max_delay: u32,

    /// Execute an instruction that shares its line with a label (`loop: set pins 1`).
    /// When off, such a line only defines the label and is skipped like a label-only line.
    #[serde(default)]
    pub inline_labels: bool,
}

impl AssemblerConfig {
    /// Returns the default delay bound.
    const fn default_max_delay() -> u32 {
        defaults::MAX_DELAY
    }
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            max_delay: defaults::MAX_DELAY,
            inline_labels: false,
        }
    }
}

/// Outside pin settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PinConfig {
    /// Pin levels applied at reset. Pins not listed read low.
    #[serde(default)]
    pub initial: BTreeMap<u32, bool>,
}
