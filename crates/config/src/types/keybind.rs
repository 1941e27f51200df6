//! Keybinding override types.
//!
//! Responsibilities:
//! - Define overridable global action identifiers (`KeybindAction`).
//! - Define `KeybindOverrides` for user-defined rebinding.
//!
//! Invariants:
//! - `KeybindAction` uses snake_case serialization to match action names in the TUI.
//! - `KeybindOverrides` uses `BTreeMap` for deterministic serialization and validation order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A global action whose key can be rebound by the user.
///
/// Only global-scope bindings are overridable; per-scope bindings are part
/// of each context's interaction contract and stay fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum KeybindAction {
    Quit,
    Help,
    OpenPalette,
    NextTab,
    PrevTab,
}

impl KeybindAction {
    pub const ALL: [KeybindAction; 5] = [
        Self::Quit,
        Self::Help,
        Self::OpenPalette,
        Self::NextTab,
        Self::PrevTab,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::Help => "help",
            Self::OpenPalette => "open_palette",
            Self::NextTab => "next_tab",
            Self::PrevTab => "prev_tab",
        }
    }
}

impl fmt::Display for KeybindAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-defined keybinding overrides.
///
/// Maps action identifiers to key strings. Actions not listed keep their
/// built-in bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindOverrides {
    #[serde(default)]
    pub overrides: BTreeMap<KeybindAction, String>,
}

impl KeybindOverrides {
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn get(&self, action: KeybindAction) -> Option<&str> {
        self.overrides.get(&action).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serde_name() {
        for action in KeybindAction::ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action));
        }
    }

    #[test]
    fn test_overrides_get() {
        let mut overrides = KeybindOverrides::default();
        assert!(overrides.is_empty());
        overrides
            .overrides
            .insert(KeybindAction::OpenPalette, "Ctrl+k".to_string());

        assert_eq!(overrides.get(KeybindAction::OpenPalette), Some("Ctrl+k"));
        assert_eq!(overrides.get(KeybindAction::Quit), None);
    }

    #[test]
    fn test_overrides_deserialize_snake_case_keys() {
        let parsed: KeybindOverrides =
            serde_json::from_str(r#"{"overrides":{"next_tab":"Ctrl+n","help":"F1"}}"#).unwrap();
        assert_eq!(parsed.get(KeybindAction::NextTab), Some("Ctrl+n"));
        assert_eq!(parsed.get(KeybindAction::Help), Some("F1"));
    }
}
