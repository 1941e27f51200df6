//! Bindings for overlay scopes.
//!
//! Overlay scopes deliberately omit tab switching and bare-letter quit so a
//! modal never leaks keys to the view beneath it.

use crossterm::event::KeyCode;

use crate::action::Action;

use super::super::{Binding, KeyChord, Scope};

/// Arrow/page movement for scopes whose text field claims printable keys.
fn arrow_navigation(scope: Scope) -> Vec<Binding> {
    vec![
        Binding::new(scope, KeyChord::plain(KeyCode::Down), Action::MoveDown, "Next item"),
        Binding::new(scope, KeyChord::plain(KeyCode::Up), Action::MoveUp, "Previous item"),
        Binding::new(scope, KeyChord::plain(KeyCode::PageDown), Action::PageDown, "Page down"),
        Binding::new(scope, KeyChord::plain(KeyCode::PageUp), Action::PageUp, "Page up"),
        Binding::new(scope, KeyChord::plain(KeyCode::Home), Action::Top, "First item"),
        Binding::new(scope, KeyChord::plain(KeyCode::End), Action::Bottom, "Last item"),
    ]
}

fn picker(scope: Scope) -> Vec<Binding> {
    let mut bindings = vec![
        Binding::new(scope, KeyChord::plain(KeyCode::Enter), Action::Select, "Choose"),
        Binding::new(scope, KeyChord::plain(KeyCode::Esc), Action::Cancel, "Cancel"),
    ];
    bindings.extend(arrow_navigation(scope));
    bindings
}

fn viewer(scope: Scope) -> Vec<Binding> {
    vec![
        Binding::new(scope, KeyChord::char('j'), Action::MoveDown, "Scroll down"),
        Binding::new(scope, KeyChord::plain(KeyCode::Down), Action::MoveDown, "Scroll down"),
        Binding::new(scope, KeyChord::char('k'), Action::MoveUp, "Scroll up"),
        Binding::new(scope, KeyChord::plain(KeyCode::Up), Action::MoveUp, "Scroll up"),
        Binding::new(scope, KeyChord::plain(KeyCode::PageDown), Action::PageDown, "Page down"),
        Binding::new(scope, KeyChord::plain(KeyCode::PageUp), Action::PageUp, "Page up"),
        Binding::new(scope, KeyChord::char('g'), Action::Top, "Top"),
        Binding::new(scope, KeyChord::char('G'), Action::Bottom, "Bottom"),
        Binding::new(scope, KeyChord::plain(KeyCode::Esc), Action::Cancel, "Close"),
        Binding::new(scope, KeyChord::char('q'), Action::Cancel, "Close"),
    ]
}

pub(super) fn bindings() -> Vec<Binding> {
    let mut bindings = Vec::new();

    bindings.extend(picker(Scope::CategoryPicker));

    bindings.extend(picker(Scope::TagPicker));
    bindings.extend([
        Binding::new(Scope::TagPicker, KeyChord::char(' '), Action::Toggle, "Toggle tag"),
        Binding::new(Scope::TagPicker, KeyChord::ctrl('d'), Action::Delete, "Remove tag"),
    ]);

    bindings.extend([
        Binding::new(
            Scope::CommandPalette,
            KeyChord::plain(KeyCode::Enter),
            Action::Select,
            "Run command",
        ),
        Binding::new(Scope::CommandPalette, KeyChord::plain(KeyCode::Esc), Action::Cancel, "Close"),
    ]);
    bindings.extend(arrow_navigation(Scope::CommandPalette));

    bindings.extend([
        Binding::new(Scope::Confirm, KeyChord::char('y'), Action::Confirm, "Confirm"),
        Binding::new(Scope::Confirm, KeyChord::plain(KeyCode::Enter), Action::Confirm, "Confirm"),
        Binding::new(Scope::Confirm, KeyChord::char('n'), Action::Cancel, "Cancel"),
        Binding::new(Scope::Confirm, KeyChord::plain(KeyCode::Esc), Action::Cancel, "Cancel"),
    ]);

    bindings.extend([
        Binding::new(Scope::CategoryEditor, KeyChord::plain(KeyCode::Enter), Action::Save, "Save"),
        Binding::new(Scope::CategoryEditor, KeyChord::plain(KeyCode::Esc), Action::Cancel, "Cancel"),
    ]);

    bindings.extend([
        Binding::new(
            Scope::DedupReview,
            KeyChord::plain(KeyCode::Enter),
            Action::Confirm,
            "Merge, keeping the first",
        ),
        Binding::new(Scope::DedupReview, KeyChord::char('d'), Action::Apply, "Keep both"),
        Binding::new(Scope::DedupReview, KeyChord::char('j'), Action::MoveDown, "Skip group"),
        Binding::new(Scope::DedupReview, KeyChord::plain(KeyCode::Down), Action::MoveDown, "Skip group"),
        Binding::new(Scope::DedupReview, KeyChord::char('k'), Action::MoveUp, "Previous group"),
        Binding::new(Scope::DedupReview, KeyChord::plain(KeyCode::Up), Action::MoveUp, "Previous group"),
        Binding::new(Scope::DedupReview, KeyChord::plain(KeyCode::Esc), Action::Cancel, "Close"),
    ]);

    bindings.extend(viewer(Scope::Viewer));
    bindings.extend(viewer(Scope::Help));

    bindings
}
