//! The persisted settings document.
//!
//! Invariants:
//! - Every field has a default, so a partial or empty file is valid.
//! - `tick_ms` is clamped to `[MIN_UI_TICK_MS, MAX_UI_TICK_MS]` by `sanitize`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::KeybindOverrides;
use crate::constants::{DEFAULT_UI_TICK_MS, MAX_UI_TICK_MS, MIN_UI_TICK_MS};

/// How pickers match the query against item text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchModeSetting {
    #[default]
    Substring,
    Fuzzy,
}

impl FromStr for MatchModeSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(Self::Substring),
            "fuzzy" => Ok(Self::Fuzzy),
            other => Err(format!("expected 'substring' or 'fuzzy', got '{other}'")),
        }
    }
}

impl fmt::Display for MatchModeSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substring => f.write_str("substring"),
            Self::Fuzzy => f.write_str("fuzzy"),
        }
    }
}

/// User settings loaded from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keybind_overrides: KeybindOverrides,
    pub picker_match_mode: MatchModeSetting,
    pub tick_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keybind_overrides: KeybindOverrides::default(),
            picker_match_mode: MatchModeSetting::default(),
            tick_ms: DEFAULT_UI_TICK_MS,
        }
    }
}

impl Settings {
    /// Clamp values into their supported ranges.
    pub fn sanitize(mut self) -> Self {
        self.tick_ms = self.tick_ms.clamp(MIN_UI_TICK_MS, MAX_UI_TICK_MS);
        self
    }
}
