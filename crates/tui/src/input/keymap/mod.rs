//! Scoped keybinding registry and key resolution.
//!
//! Responsibilities:
//! - Define scopes (keybinding namespaces) and normalized key chords.
//! - Resolve `(key, scope)` to a binding, falling back to the global scope.
//! - Answer reverse lookups (`key_for`) used by the footer and help text.
//!
//! Non-responsibilities:
//! - Choosing the active scope (see `app::precedence`).
//! - Handling text entry; focused fields claim keys before lookup.
//!
//! Invariants:
//! - Within one scope a chord maps to at most one binding; duplicates are a
//!   construction error.
//! - The registry is immutable after construction, so lookup is pure.

use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::action::Action;

pub(crate) mod bindings;
pub mod overrides;

/// A keybinding namespace owned by one kind of interaction context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    Global,
    Transactions,
    TransactionFilter,
    Categories,
    Dedup,
    CategoryPicker,
    TagPicker,
    CommandPalette,
    Confirm,
    CategoryEditor,
    DedupReview,
    Viewer,
    Help,
}

impl Scope {
    pub const ALL: [Scope; 13] = [
        Self::Global,
        Self::Transactions,
        Self::TransactionFilter,
        Self::Categories,
        Self::Dedup,
        Self::CategoryPicker,
        Self::TagPicker,
        Self::CommandPalette,
        Self::Confirm,
        Self::CategoryEditor,
        Self::DedupReview,
        Self::Viewer,
        Self::Help,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Transactions => "transactions",
            Self::TransactionFilter => "transaction_filter",
            Self::Categories => "categories",
            Self::Dedup => "dedup",
            Self::CategoryPicker => "category_picker",
            Self::TagPicker => "tag_picker",
            Self::CommandPalette => "command_palette",
            Self::Confirm => "confirm",
            Self::CategoryEditor => "category_editor",
            Self::DedupReview => "dedup_review",
            Self::Viewer => "viewer",
            Self::Help => "help",
        }
    }

    /// Human-readable title used by help output.
    pub fn title(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Transactions => "Transactions",
            Self::TransactionFilter => "Transaction Filter",
            Self::Categories => "Categories",
            Self::Dedup => "Duplicates",
            Self::CategoryPicker => "Category Picker",
            Self::TagPicker => "Tag Picker",
            Self::CommandPalette => "Command Palette",
            Self::Confirm => "Confirm",
            Self::CategoryEditor => "Category Editor",
            Self::DedupReview => "Duplicate Review",
            Self::Viewer => "Viewer",
            Self::Help => "Help",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A key code plus modifiers, normalized for lookup.
///
/// SHIFT is dropped for character keys (the char already carries the case)
/// and for `BackTab`, so terminals that report it either way resolve alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(_) | KeyCode::BackTab => Self {
                code: self.code,
                modifiers: self.modifiers.difference(KeyModifiers::SHIFT),
            },
            _ => self,
        }
    }
}

impl From<KeyEvent> for KeyChord {
    fn from(key: KeyEvent) -> Self {
        Self::new(key.code, key.modifiers).normalized()
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("Alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("Shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::F(n) => write!(f, "F{n}"),
            KeyCode::Enter => f.write_str("Enter"),
            KeyCode::Esc => f.write_str("Esc"),
            KeyCode::Tab => f.write_str("Tab"),
            KeyCode::BackTab => f.write_str("Shift+Tab"),
            KeyCode::Backspace => f.write_str("Backspace"),
            KeyCode::Delete => f.write_str("Del"),
            KeyCode::Insert => f.write_str("Ins"),
            KeyCode::Home => f.write_str("Home"),
            KeyCode::End => f.write_str("End"),
            KeyCode::PageUp => f.write_str("PgUp"),
            KeyCode::PageDown => f.write_str("PgDn"),
            KeyCode::Up => f.write_str("Up"),
            KeyCode::Down => f.write_str("Down"),
            KeyCode::Left => f.write_str("Left"),
            KeyCode::Right => f.write_str("Right"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// `(chord, scope) -> (action, optional command id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub scope: Scope,
    pub chord: KeyChord,
    pub action: Action,
    /// Command run instead of capability dispatch when present.
    pub command: Option<&'static str>,
    pub description: &'static str,
}

impl Binding {
    pub const fn new(
        scope: Scope,
        chord: KeyChord,
        action: Action,
        description: &'static str,
    ) -> Self {
        Self {
            scope,
            chord,
            action,
            command: None,
            description,
        }
    }

    pub const fn with_command(mut self, id: &'static str) -> Self {
        self.command = Some(id);
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeymapError {
    #[error("duplicate binding for '{chord}' in scope '{scope}'")]
    Duplicate { chord: String, scope: Scope },
}

/// Immutable lookup table over every binding in the application.
#[derive(Debug, Clone)]
pub struct BindingRegistry {
    bindings: Vec<Binding>,
    index: HashMap<(KeyChord, Scope), usize>,
}

impl BindingRegistry {
    /// Build the registry, rejecting duplicate `(chord, scope)` pairs.
    pub fn new(bindings: Vec<Binding>) -> Result<Self, KeymapError> {
        let mut index = HashMap::with_capacity(bindings.len());
        for (i, binding) in bindings.iter().enumerate() {
            let key = (binding.chord.normalized(), binding.scope);
            if index.insert(key, i).is_some() {
                return Err(KeymapError::Duplicate {
                    chord: binding.chord.to_string(),
                    scope: binding.scope,
                });
            }
        }
        Ok(Self { bindings, index })
    }

    /// The built-in catalog.
    pub fn with_defaults() -> Result<Self, KeymapError> {
        Self::new(bindings::defaults())
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Exact scope first, then global. `None` means the key is unbound.
    pub fn lookup(&self, chord: KeyChord, scope: Scope) -> Option<&Binding> {
        let chord = chord.normalized();
        self.index
            .get(&(chord, scope))
            .or_else(|| self.index.get(&(chord, Scope::Global)))
            .map(|&i| &self.bindings[i])
    }

    pub fn resolve(&self, key: KeyEvent, scope: Scope) -> Option<&Binding> {
        self.lookup(KeyChord::from(key), scope)
    }

    /// Bindings declared directly in `scope`, in declaration order.
    pub fn scope_bindings(&self, scope: Scope) -> impl Iterator<Item = &Binding> {
        self.bindings.iter().filter(move |b| b.scope == scope)
    }

    /// Scope bindings followed by global bindings the scope does not shadow.
    pub fn hints_for_scope(&self, scope: Scope) -> Vec<(String, Action)> {
        self.visible_bindings(scope)
            .map(|b| (b.chord.to_string(), b.action))
            .collect()
    }

    pub(crate) fn visible_bindings(&self, scope: Scope) -> impl Iterator<Item = &Binding> {
        let globals = self
            .scope_bindings(Scope::Global)
            .filter(move |b| {
                scope == Scope::Global || !self.index.contains_key(&(b.chord.normalized(), scope))
            });
        let own = self
            .scope_bindings(scope)
            .filter(move |_| scope != Scope::Global);
        own.chain(globals)
    }

    /// First chord that triggers `action` without a command in `scope`,
    /// falling back to global.
    pub fn key_for(&self, action: Action, scope: Scope) -> Option<KeyChord> {
        self.first_visible(scope, |b| b.action == action && b.command.is_none())
    }

    /// First chord bound to the command `id` in `scope`, falling back to global.
    pub fn key_for_command(&self, id: &str, scope: Scope) -> Option<KeyChord> {
        self.first_visible(scope, |b| b.command == Some(id))
    }

    fn first_visible(&self, scope: Scope, pred: impl Fn(&Binding) -> bool) -> Option<KeyChord> {
        self.visible_bindings(scope)
            .find(|b| pred(b))
            .map(|b| b.chord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn registry() -> BindingRegistry {
        BindingRegistry::new(vec![
            Binding::new(Scope::Global, KeyChord::ctrl('q'), Action::Quit, "Quit"),
            Binding::new(Scope::Global, KeyChord::plain(KeyCode::F(1)), Action::Help, "Help"),
            Binding::new(Scope::Transactions, KeyChord::char('j'), Action::MoveDown, "Down"),
            Binding::new(Scope::Transactions, KeyChord::plain(KeyCode::F(1)), Action::Select, "Shadow"),
            Binding::new(Scope::Categories, KeyChord::char('n'), Action::Edit, "New")
                .with_command("cat.new"),
        ])
        .unwrap()
    }

    #[test]
    fn exact_scope_wins_over_global() {
        let reg = registry();
        let b = reg.resolve(key(KeyCode::F(1)), Scope::Transactions).unwrap();
        assert_eq!(b.action, Action::Select);
        let b = reg.resolve(key(KeyCode::F(1)), Scope::Categories).unwrap();
        assert_eq!(b.action, Action::Help);
    }

    #[test]
    fn unbound_key_is_none() {
        let reg = registry();
        assert!(reg.resolve(key(KeyCode::Char('j')), Scope::Categories).is_none());
    }

    #[test]
    fn shift_is_ignored_for_chars() {
        let reg = registry();
        let shifted = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::SHIFT);
        assert!(reg.resolve(shifted, Scope::Transactions).is_some());
        let backtab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(KeyChord::from(backtab), KeyChord::plain(KeyCode::BackTab));
    }

    #[test]
    fn duplicate_binding_is_rejected() {
        let err = BindingRegistry::new(vec![
            Binding::new(Scope::Confirm, KeyChord::char('y'), Action::Confirm, "Yes"),
            Binding::new(Scope::Confirm, KeyChord::char('y'), Action::Cancel, "No"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            KeymapError::Duplicate {
                chord: "y".into(),
                scope: Scope::Confirm
            }
        );
    }

    #[test]
    fn same_chord_in_different_scopes_is_allowed() {
        assert!(
            BindingRegistry::new(vec![
                Binding::new(Scope::Confirm, KeyChord::char('y'), Action::Confirm, "Yes"),
                Binding::new(Scope::Viewer, KeyChord::char('y'), Action::Cancel, "Close"),
            ])
            .is_ok()
        );
    }

    #[test]
    fn hints_skip_shadowed_globals() {
        let reg = registry();
        let hints = reg.hints_for_scope(Scope::Transactions);
        assert_eq!(
            hints,
            vec![
                ("j".to_string(), Action::MoveDown),
                ("F1".to_string(), Action::Select),
                ("Ctrl+q".to_string(), Action::Quit),
            ]
        );
    }

    #[test]
    fn key_for_prefers_scope_then_global() {
        let reg = registry();
        assert_eq!(
            reg.key_for(Action::Quit, Scope::Categories),
            Some(KeyChord::ctrl('q'))
        );
        assert_eq!(reg.key_for(Action::Help, Scope::Transactions), None);
        assert_eq!(reg.key_for(Action::Edit, Scope::Categories), None);
        assert_eq!(
            reg.key_for_command("cat.new", Scope::Categories),
            Some(KeyChord::char('n'))
        );
    }

    #[test]
    fn chord_display() {
        assert_eq!(KeyChord::ctrl('p').to_string(), "Ctrl+p");
        assert_eq!(KeyChord::char(' ').to_string(), "Space");
        assert_eq!(KeyChord::plain(KeyCode::BackTab).to_string(), "Shift+Tab");
        assert_eq!(KeyChord::plain(KeyCode::Enter).to_string(), "Enter");
    }
}
