//! Outside Pins.
//!
//! External signal levels a program can poll with `WAIT`. The driving harness sets them
//! between steps to simulate the environment; the program never writes them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Levels of the pins outside the state machine, keyed by pin index.
///
/// A pin that was never set reads low.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutsidePins {
    levels: BTreeMap<u32, bool>,
}

impl OutsidePins {
    /// Creates a set of pins that all read low.
    pub const fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Reads a pin level.
    #[inline]
    pub fn get(&self, pin: u32) -> bool {
        self.levels.get(&pin).copied().unwrap_or(false)
    }

    /// Drives a pin level.
    pub fn set(&mut self, pin: u32, level: bool) {
        let _ = self.levels.insert(pin, level);
    }

    /// Iterates over the pins that have been driven explicitly.
    pub fn iter(&self) -> impl Iterator<Item = (u32, bool)> + '_ {
        self.levels.iter().map(|(&pin, &level)| (pin, level))
    }
}

impl FromIterator<(u32, bool)> for OutsidePins {
    fn from_iter<I: IntoIterator<Item = (u32, bool)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().collect(),
        }
    }
}
