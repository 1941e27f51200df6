//! Keybinding string parsing and validation.
//!
//! Responsibilities:
//! - Parse human-readable key strings ("Ctrl+p", "F1", "Shift+Tab") into
//!   structured form.
//! - Validate user overrides for syntax, reserved keys and conflicts.
//!
//! Does NOT handle:
//! - Conversion to crossterm events (that's in the TUI crate).
//! - Runtime key event matching.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use thiserror::Error;

use crate::types::KeybindAction;

/// Errors that can occur when parsing or validating keybindings.
#[derive(Debug, Error, PartialEq)]
pub enum KeybindError {
    #[error("Invalid key syntax: '{key}'. Expected format like 'q', 'Ctrl+p', 'Shift+Tab', 'F1'")]
    InvalidSyntax { key: String },

    #[error("Unknown key name: '{name}'")]
    UnknownKey { name: String },

    #[error("Conflicting keybindings: '{key}' is assigned to both {first} and {second}")]
    Conflict {
        key: String,
        first: KeybindAction,
        second: KeybindAction,
    },

    #[error("Reserved keybinding: '{key}' cannot be overridden")]
    ReservedKey { key: String },
}

/// A parsed key combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedKey {
    pub code: KeyCodeName,
    pub modifiers: ModifierFlags,
}

impl fmt::Display for ParsedKey {
    /// Canonical form: modifiers in Ctrl, Alt, Shift order, then the key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.alt {
            write!(f, "Alt+")?;
        }
        if self.modifiers.shift {
            write!(f, "Shift+")?;
        }
        write!(f, "{}", self.code)
    }
}

/// Key code names that can be parsed from config strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCodeName {
    Char(char),
    /// Function key F1-F20
    F(u8),
    Esc,
    Enter,
    Space,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for KeyCodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::F(n) => write!(f, "F{n}"),
            Self::Esc => write!(f, "Esc"),
            Self::Enter => write!(f, "Enter"),
            Self::Space => write!(f, "Space"),
            Self::Tab => write!(f, "Tab"),
            Self::BackTab => write!(f, "BackTab"),
            Self::Backspace => write!(f, "Backspace"),
            Self::Delete => write!(f, "Delete"),
            Self::Insert => write!(f, "Insert"),
            Self::Home => write!(f, "Home"),
            Self::End => write!(f, "End"),
            Self::PageUp => write!(f, "PageUp"),
            Self::PageDown => write!(f, "PageDown"),
            Self::Up => write!(f, "Up"),
            Self::Down => write!(f, "Down"),
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

/// Modifier flags for key combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ModifierFlags {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

/// Parse a key string like "Ctrl+p", "F1", "Shift+Tab" into structured form.
///
/// # Examples
///
/// ```
/// use tally_config::keybind::{parse_key, KeyCodeName};
///
/// let key = parse_key("Ctrl+p").unwrap();
/// assert!(matches!(key.code, KeyCodeName::Char('p')));
/// assert!(key.modifiers.ctrl);
///
/// let key = parse_key("F1").unwrap();
/// assert!(matches!(key.code, KeyCodeName::F(1)));
/// ```
pub fn parse_key(key_str: &str) -> Result<ParsedKey, KeybindError> {
    let key_str = key_str.trim();
    let invalid = || KeybindError::InvalidSyntax {
        key: key_str.to_string(),
    };

    if key_str.is_empty() {
        return Err(invalid());
    }

    // A bare "+" is the plus key, not a separator.
    if key_str == "+" {
        return Ok(ParsedKey {
            code: KeyCodeName::Char('+'),
            modifiers: ModifierFlags::default(),
        });
    }

    let mut modifiers = ModifierFlags::default();
    let mut key_name: Option<&str> = None;

    for part in key_str.split('+').map(str::trim) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.ctrl = true,
            "shift" => modifiers.shift = true,
            "alt" | "option" => modifiers.alt = true,
            "" => return Err(invalid()),
            _ if key_name.is_some() => return Err(invalid()),
            _ => key_name = Some(part),
        }
    }

    let Some(key_name) = key_name else {
        return Err(invalid());
    };

    let code = match parse_key_code(key_name)? {
        KeyCodeName::Tab if modifiers.shift => {
            modifiers.shift = false;
            KeyCodeName::BackTab
        }
        code => code,
    };

    Ok(ParsedKey { code, modifiers })
}

fn parse_key_code(name: &str) -> Result<KeyCodeName, KeybindError> {
    let lower = name.to_ascii_lowercase();

    let named = match lower.as_str() {
        "esc" | "escape" => Some(KeyCodeName::Esc),
        "enter" | "return" => Some(KeyCodeName::Enter),
        "space" => Some(KeyCodeName::Space),
        "tab" => Some(KeyCodeName::Tab),
        "backtab" => Some(KeyCodeName::BackTab),
        "backspace" => Some(KeyCodeName::Backspace),
        "delete" | "del" => Some(KeyCodeName::Delete),
        "insert" | "ins" => Some(KeyCodeName::Insert),
        "home" => Some(KeyCodeName::Home),
        "end" => Some(KeyCodeName::End),
        "pageup" | "page_up" | "pgup" => Some(KeyCodeName::PageUp),
        "pagedown" | "page_down" | "pgdn" => Some(KeyCodeName::PageDown),
        "up" => Some(KeyCodeName::Up),
        "down" => Some(KeyCodeName::Down),
        "left" => Some(KeyCodeName::Left),
        "right" => Some(KeyCodeName::Right),
        _ => None,
    };
    if let Some(code) = named {
        return Ok(code);
    }

    if let Some(num) = lower.strip_prefix('f')
        && let Ok(num) = num.parse::<u8>()
        && (1..=20).contains(&num)
    {
        return Ok(KeyCodeName::F(num));
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(KeyCodeName::Char(c)),
        _ => Err(KeybindError::UnknownKey {
            name: name.to_string(),
        }),
    }
}

/// Keys that can never be overridden (interrupt and suspend).
pub const RESERVED_KEYS: &[&str] = &["Ctrl+c", "Ctrl+z"];

fn is_reserved(key: &ParsedKey) -> bool {
    RESERVED_KEYS
        .iter()
        .filter_map(|reserved| parse_key(reserved).ok())
        .any(|reserved| {
            reserved.modifiers == key.modifiers
                && match (&reserved.code, &key.code) {
                    (KeyCodeName::Char(a), KeyCodeName::Char(b)) => a.eq_ignore_ascii_case(b),
                    (a, b) => a == b,
                }
        })
}

/// Validate a set of keybinding overrides.
///
/// Fails on the first unparsable key, reserved key, or key assigned to two
/// actions. Keys are compared in canonical form, so "ctrl+P" and "Ctrl + P"
/// conflict.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use tally_config::keybind::validate_overrides;
/// use tally_config::KeybindAction;
///
/// let mut overrides = BTreeMap::new();
/// overrides.insert(KeybindAction::Quit, "F10".to_string());
/// overrides.insert(KeybindAction::Help, "F1".to_string());
///
/// assert!(validate_overrides(&overrides).is_ok());
/// ```
pub fn validate_overrides(
    overrides: &BTreeMap<KeybindAction, String>,
) -> Result<(), KeybindError> {
    let mut seen: HashMap<ParsedKey, KeybindAction> = HashMap::new();

    for (action, key_str) in overrides {
        let parsed = parse_key(key_str)?;
        if is_reserved(&parsed) {
            return Err(KeybindError::ReservedKey {
                key: key_str.clone(),
            });
        }

        let canonical = canonicalize(parsed);
        if let Some(first) = seen.get(&canonical) {
            return Err(KeybindError::Conflict {
                key: key_str.clone(),
                first: *first,
                second: *action,
            });
        }
        seen.insert(canonical, *action);
    }

    Ok(())
}

/// Letters bound with Ctrl are case-insensitive in terminals.
fn canonicalize(mut key: ParsedKey) -> ParsedKey {
    if key.modifiers.ctrl
        && let KeyCodeName::Char(c) = key.code
    {
        key.code = KeyCodeName::Char(c.to_ascii_lowercase());
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_char() {
        let key = parse_key("q").unwrap();
        assert_eq!(key.code, KeyCodeName::Char('q'));
        assert_eq!(key.modifiers, ModifierFlags::default());
    }

    #[test]
    fn test_parse_keeps_char_case() {
        let key = parse_key("R").unwrap();
        assert_eq!(key.code, KeyCodeName::Char('R'));
    }

    #[test]
    fn test_parse_ctrl_alt_combo() {
        let key = parse_key("Ctrl+Alt+x").unwrap();
        assert_eq!(key.code, KeyCodeName::Char('x'));
        assert!(key.modifiers.ctrl);
        assert!(key.modifiers.alt);
        assert!(!key.modifiers.shift);
    }

    #[test]
    fn test_parse_tolerates_spaces_and_case() {
        let key = parse_key(" control + P ").unwrap();
        assert_eq!(key.code, KeyCodeName::Char('P'));
        assert!(key.modifiers.ctrl);
    }

    #[test]
    fn test_parse_function_keys() {
        assert_eq!(parse_key("F1").unwrap().code, KeyCodeName::F(1));
        assert_eq!(parse_key("f12").unwrap().code, KeyCodeName::F(12));
        assert!(matches!(
            parse_key("F21"),
            Err(KeybindError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_shift_tab_becomes_backtab() {
        let key = parse_key("Shift+Tab").unwrap();
        assert_eq!(key.code, KeyCodeName::BackTab);
        assert!(!key.modifiers.shift);
    }

    #[test]
    fn test_plus_key() {
        assert_eq!(parse_key("+").unwrap().code, KeyCodeName::Char('+'));
    }

    #[test]
    fn test_invalid_syntax() {
        assert!(matches!(
            parse_key(""),
            Err(KeybindError::InvalidSyntax { .. })
        ));
        assert!(matches!(
            parse_key("Ctrl+"),
            Err(KeybindError::InvalidSyntax { .. })
        ));
        assert!(matches!(
            parse_key("Ctrl+a+b"),
            Err(KeybindError::InvalidSyntax { .. })
        ));
        assert!(matches!(
            parse_key("Ctrl+Shift"),
            Err(KeybindError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn test_unknown_key_name() {
        assert_eq!(
            parse_key("Hyper"),
            Err(KeybindError::UnknownKey {
                name: "Hyper".to_string()
            })
        );
    }

    #[test]
    fn test_display_is_canonical() {
        let key = parse_key("shift+alt+ctrl+Left").unwrap();
        assert_eq!(key.to_string(), "Ctrl+Alt+Shift+Left");
    }

    #[test]
    fn test_validate_rejects_reserved() {
        let mut overrides = BTreeMap::new();
        overrides.insert(KeybindAction::Quit, "Ctrl+C".to_string());
        assert!(matches!(
            validate_overrides(&overrides),
            Err(KeybindError::ReservedKey { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_conflict_in_canonical_form() {
        let mut overrides = BTreeMap::new();
        overrides.insert(KeybindAction::Quit, "ctrl+p".to_string());
        overrides.insert(KeybindAction::OpenPalette, "Ctrl + P".to_string());
        let err = validate_overrides(&overrides).unwrap_err();
        assert!(matches!(err, KeybindError::Conflict { .. }));
    }

    #[test]
    fn test_validate_propagates_parse_errors() {
        let mut overrides = BTreeMap::new();
        overrides.insert(KeybindAction::Help, "Meta+?".to_string());
        assert!(validate_overrides(&overrides).is_err());
    }

    #[test]
    fn test_validate_accepts_distinct_keys() {
        let mut overrides = BTreeMap::new();
        overrides.insert(KeybindAction::Help, "F1".to_string());
        overrides.insert(KeybindAction::NextTab, "Ctrl+n".to_string());
        assert!(validate_overrides(&overrides).is_ok());
    }
}
