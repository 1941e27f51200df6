//! Command palette: a query field over the command registry.
//!
//! The palette never touches the registry itself. The app refreshes
//! `entries` after any event that leaves the palette dirty, and runs the
//! chosen id once the palette closes.

use crossterm::event::KeyEvent;
use tally_config::constants::DEFAULT_PAGE_SIZE;

use crate::action::{Action, ContextId};
use crate::contract::{ContextKind, InteractionContract};
use crate::input::keymap::Scope;
use crate::text_field::{FieldFlags, TextEdit, TextField};

use super::{Confirmable, Context, Editable, Effects, ListCursor, Navigable, Outcome, Selectable};

/// One listed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Reason the command cannot run right now.
    pub disabled: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PaletteContext {
    id: ContextId,
    /// Scope the palette was opened over; commands are filtered by it.
    origin: Scope,
    query: TextField,
    entries: Vec<PaletteEntry>,
    cursor: ListCursor,
    dirty: bool,
}

impl PaletteContext {
    pub fn new(origin: Scope) -> Self {
        Self {
            id: ContextId::new(),
            origin,
            query: TextField::new(FieldFlags::PRINTABLE_FIRST | FieldFlags::VIM_NAV_SUPPRESSED),
            entries: Vec::new(),
            cursor: ListCursor::new(0, DEFAULT_PAGE_SIZE),
            dirty: true,
        }
    }

    pub fn origin(&self) -> Scope {
        self.origin
    }

    pub fn query(&self) -> &str {
        self.query.value()
    }

    pub fn query_field(&self) -> &TextField {
        &self.query
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    pub fn highlighted(&self) -> Option<&PaletteEntry> {
        self.entries.get(self.cursor.index())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the listed commands. Resets the cursor.
    pub fn set_entries(&mut self, entries: Vec<PaletteEntry>) {
        self.cursor.set_len(entries.len());
        self.cursor.reset();
        self.entries = entries;
        self.dirty = false;
    }
}

impl Navigable for PaletteContext {
    fn navigate(&mut self, action: Action) -> Outcome {
        self.cursor.navigate(action)
    }
}

impl Selectable for PaletteContext {
    /// Run the highlighted command, or the typed id when nothing is listed.
    fn select(&mut self, _fx: &mut Effects) -> Outcome {
        if let Some(entry) = self.highlighted() {
            return Outcome::Run(entry.id.clone());
        }
        let typed = self.query.value().trim();
        if typed.is_empty() {
            Outcome::NoOp
        } else {
            Outcome::Run(typed.to_string())
        }
    }
}

impl Editable for PaletteContext {
    fn field(&self) -> Option<&TextField> {
        Some(&self.query)
    }

    fn edit(&mut self, key: KeyEvent) -> Outcome {
        match self.query.handle_key(key) {
            TextEdit::Ignored => Outcome::NoOp,
            edit => {
                if edit.changed_text() {
                    self.dirty = true;
                }
                Outcome::Handled
            }
        }
    }
}

impl Confirmable for PaletteContext {
    fn confirm(&mut self, fx: &mut Effects) -> Outcome {
        self.select(fx)
    }

    fn cancel(&mut self, _fx: &mut Effects) -> Outcome {
        Outcome::Close
    }
}

impl Context for PaletteContext {
    fn id(&self) -> ContextId {
        self.id
    }

    fn scope(&self) -> Scope {
        Scope::CommandPalette
    }

    fn contract(&self) -> InteractionContract {
        InteractionContract::base(ContextKind::List, Scope::CommandPalette)
            .relabel(Action::Select, "run")
            .require(Action::Select)
            .require(Action::Cancel)
    }

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        Some(self)
    }

    fn selectable(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
    }

    fn editable(&self) -> Option<&dyn Editable> {
        Some(self)
    }

    fn editable_mut(&mut self) -> Option<&mut dyn Editable> {
        Some(self)
    }

    fn confirmable(&mut self) -> Option<&mut dyn Confirmable> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{dispatch, edit_key};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn entry(id: &str) -> PaletteEntry {
        PaletteEntry {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            disabled: None,
        }
    }

    #[test]
    fn typing_marks_dirty_until_refreshed() {
        let mut palette = PaletteContext::new(Scope::Transactions);
        palette.set_entries(vec![entry("cat.new")]);
        assert!(!palette.is_dirty());
        edit_key(&mut palette, KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE));
        assert_eq!(palette.query(), "k");
        assert!(palette.is_dirty());
    }

    #[test]
    fn enter_runs_highlighted_or_typed_id() {
        let mut palette = PaletteContext::new(Scope::Transactions);
        palette.set_entries(vec![entry("cat.new"), entry("cat.rename")]);
        let mut fx = Effects::new();
        dispatch(&mut palette, Action::MoveDown, &mut fx);
        assert_eq!(
            dispatch(&mut palette, Action::Select, &mut fx),
            Outcome::Run("cat.rename".into())
        );

        let mut hidden = PaletteContext::new(Scope::Transactions);
        for c in "filter.apply.2".chars() {
            edit_key(&mut hidden, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        hidden.set_entries(Vec::new());
        assert_eq!(
            dispatch(&mut hidden, Action::Select, &mut fx),
            Outcome::Run("filter.apply.2".into())
        );
    }
}
