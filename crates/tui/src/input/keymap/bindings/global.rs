//! Global bindings, consulted after the active scope.

use crossterm::event::KeyCode;

use crate::action::Action;

use super::super::{Binding, KeyChord, Scope};

pub(super) fn bindings() -> Vec<Binding> {
    vec![
        Binding::new(Scope::Global, KeyChord::ctrl('c'), Action::Quit, "Quit"),
        Binding::new(Scope::Global, KeyChord::ctrl('q'), Action::Quit, "Quit"),
        Binding::new(
            Scope::Global,
            KeyChord::ctrl('p'),
            Action::OpenPalette,
            "Open command palette",
        ),
        Binding::new(
            Scope::Global,
            KeyChord::plain(KeyCode::F(1)),
            Action::Help,
            "Show help",
        ),
    ]
}
