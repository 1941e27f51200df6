//! User keybinding overrides.
//!
//! Bridges `tally_config`'s `KeybindOverrides` into the binding catalog.
//! Overrides replace the *global* chords of app-level actions; scope-local
//! chords (such as `q` in list views) are part of each context's contract
//! and stay as declared.
//!
//! Responsibilities:
//! - Convert parsed key strings into `KeyChord`s.
//! - Rewrite the default catalog before the registry is built.
//!
//! Does NOT handle:
//! - Parsing or validating key strings (see `tally_config::keybind`).
//! - Runtime rebinding; overrides are applied once at startup.
//!
//! Invariants:
//! - Invalid override sets are logged and ignored as a whole.
//! - Reserved chords (`Ctrl+c`) keep their default binding.

use crossterm::event::{KeyCode, KeyModifiers};
use tally_config::KeybindOverrides;
use tally_config::keybind::{
    KeyCodeName, ModifierFlags, ParsedKey, RESERVED_KEYS, parse_key, validate_overrides,
};

use super::{Binding, BindingRegistry, KeyChord, KeymapError, Scope, bindings};
use crate::action::Action;

/// Converts a parsed key from config into a lookup chord.
pub fn parsed_key_to_chord(parsed: &ParsedKey) -> KeyChord {
    let code = match &parsed.code {
        KeyCodeName::Char(c) => KeyCode::Char(*c),
        KeyCodeName::F(n) => KeyCode::F(*n),
        KeyCodeName::Esc => KeyCode::Esc,
        KeyCodeName::Enter => KeyCode::Enter,
        KeyCodeName::Space => KeyCode::Char(' '),
        KeyCodeName::Tab => KeyCode::Tab,
        KeyCodeName::BackTab => KeyCode::BackTab,
        KeyCodeName::Backspace => KeyCode::Backspace,
        KeyCodeName::Delete => KeyCode::Delete,
        KeyCodeName::Insert => KeyCode::Insert,
        KeyCodeName::Home => KeyCode::Home,
        KeyCodeName::End => KeyCode::End,
        KeyCodeName::PageUp => KeyCode::PageUp,
        KeyCodeName::PageDown => KeyCode::PageDown,
        KeyCodeName::Up => KeyCode::Up,
        KeyCodeName::Down => KeyCode::Down,
        KeyCodeName::Left => KeyCode::Left,
        KeyCodeName::Right => KeyCode::Right,
    };
    let chord = KeyChord::new(code, modifier_flags_to_crossterm(parsed.modifiers));
    // Terminals report Ctrl+letter in lower case.
    match chord.code {
        KeyCode::Char(c) if chord.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyChord::new(KeyCode::Char(c.to_ascii_lowercase()), chord.modifiers)
        }
        _ => chord,
    }
}

fn modifier_flags_to_crossterm(flags: ModifierFlags) -> KeyModifiers {
    let mut modifiers = KeyModifiers::NONE;
    if flags.ctrl {
        modifiers |= KeyModifiers::CONTROL;
    }
    if flags.shift {
        modifiers |= KeyModifiers::SHIFT;
    }
    if flags.alt {
        modifiers |= KeyModifiers::ALT;
    }
    modifiers
}

fn reserved_chords() -> Vec<KeyChord> {
    RESERVED_KEYS
        .iter()
        .filter_map(|key| parse_key(key).ok())
        .map(|parsed| parsed_key_to_chord(&parsed))
        .collect()
}

/// Rewrite `defaults` with the user's global overrides.
///
/// Returns `defaults` unchanged if the override set fails validation.
pub fn apply_overrides(mut defaults: Vec<Binding>, overrides: &KeybindOverrides) -> Vec<Binding> {
    if overrides.is_empty() {
        tracing::debug!("No keybinding overrides configured");
        return defaults;
    }

    if let Err(e) = validate_overrides(&overrides.overrides) {
        tracing::warn!(error = %e, "Keybinding validation failed. Using default keybindings.");
        return defaults;
    }

    let reserved = reserved_chords();
    let overridden: Vec<Action> = overrides.overrides.keys().map(|a| Action::from(*a)).collect();
    let mut applied = 0usize;

    for (kb_action, key_str) in &overrides.overrides {
        let Ok(parsed) = parse_key(key_str) else {
            continue;
        };
        let action = Action::from(*kb_action);
        let chord = parsed_key_to_chord(&parsed).normalized();

        let collides = defaults.iter().any(|b| {
            b.scope == Scope::Global
                && b.chord == chord
                && b.action != action
                && !overridden.contains(&b.action)
        });
        if collides {
            tracing::warn!(
                action = %kb_action,
                key = %key_str,
                "Keybinding override collides with a built-in global key; ignoring"
            );
            continue;
        }

        defaults.retain(|b| {
            !(b.scope == Scope::Global && b.action == action && !reserved.contains(&b.chord))
        });
        defaults.push(Binding::new(Scope::Global, chord, action, "User override"));
        applied += 1;
    }

    tracing::info!(count = applied, "Loaded keybinding override(s)");
    defaults
}

/// Build the registry from the default catalog plus user overrides.
pub fn registry_with_overrides(
    overrides: &KeybindOverrides,
) -> Result<BindingRegistry, KeymapError> {
    BindingRegistry::new(apply_overrides(bindings::defaults(), overrides))
}
