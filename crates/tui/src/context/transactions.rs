//! Transactions tab: a filterable list over the current snapshot.
//!
//! The filter field is focus-gated. While it is focused the context reports
//! the `TransactionFilter` scope, so `j`/`k` and letters type into the field
//! instead of moving the cursor.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use tally_config::constants::DEFAULT_PAGE_SIZE;

use crate::action::{Action, ContextId};
use crate::contract::{ContextKind, InteractionContract};
use crate::input::keymap::Scope;
use crate::model::{DataSnapshot, Transaction, TransactionId};
use crate::text_field::{FieldFlags, TextEdit, TextField};

use super::{Confirmable, Context, Editable, Effects, ListCursor, Navigable, Outcome};

#[derive(Debug, Clone)]
pub struct TransactionList {
    id: ContextId,
    data: Arc<DataSnapshot>,
    filter: TextField,
    filtering: bool,
    rows: Vec<TransactionId>,
    cursor: ListCursor,
}

/// Case-insensitive match of `query` against what the list displays.
fn matches(txn: &Transaction, data: &DataSnapshot, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let hit = |text: &str| text.to_lowercase().contains(query);
    hit(&txn.payee)
        || hit(&txn.date)
        || hit(data.category_name(txn.category))
        || txn.memo.as_deref().is_some_and(hit)
        || txn.tags.iter().any(|t| hit(t))
}

impl TransactionList {
    pub fn new(data: Arc<DataSnapshot>) -> Self {
        let mut list = Self {
            id: ContextId::new(),
            data,
            filter: TextField::new(
                FieldFlags::CURSOR_AWARE | FieldFlags::PRINTABLE_FIRST | FieldFlags::VIM_NAV_SUPPRESSED,
            ),
            filtering: false,
            rows: Vec::new(),
            cursor: ListCursor::new(0, DEFAULT_PAGE_SIZE),
        };
        list.refilter();
        list
    }

    /// Swap in a new snapshot, keeping the selected transaction if it survives.
    pub fn set_data(&mut self, data: Arc<DataSnapshot>) {
        let selected = self.selected_id();
        self.data = data;
        self.refilter();
        if let Some(pos) = selected.and_then(|id| self.rows.iter().position(|&r| r == id)) {
            self.cursor.set_index(pos);
        }
    }

    fn refilter(&mut self) {
        let query = self.filter.value().trim().to_lowercase();
        self.rows = self
            .data
            .transactions
            .iter()
            .filter(|txn| matches(txn, &self.data, &query))
            .map(|txn| txn.id)
            .collect();
        self.cursor.set_len(self.rows.len());
        self.cursor.reset();
    }

    pub fn data(&self) -> &DataSnapshot {
        &self.data
    }

    /// Visible transactions in display order.
    pub fn rows(&self) -> impl Iterator<Item = &Transaction> {
        self.rows.iter().filter_map(|&id| self.data.transaction(id))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    pub fn selected_id(&self) -> Option<TransactionId> {
        self.rows.get(self.cursor.index()).copied()
    }

    pub fn selected(&self) -> Option<&Transaction> {
        self.selected_id().and_then(|id| self.data.transaction(id))
    }

    pub fn filter(&self) -> &TextField {
        &self.filter
    }

    pub fn is_filtering(&self) -> bool {
        self.filtering
    }

    /// Replace the filter text without focusing the field.
    pub fn set_filter(&mut self, query: &str) {
        self.filter.set_value(query);
        self.filtering = false;
        self.refilter();
    }

    pub fn clear_filter(&mut self) -> bool {
        self.filtering = false;
        if self.filter.clear().changed_text() {
            self.refilter();
            true
        } else {
            false
        }
    }
}

impl Navigable for TransactionList {
    fn navigate(&mut self, action: Action) -> Outcome {
        self.cursor.navigate(action)
    }
}

impl Editable for TransactionList {
    fn field(&self) -> Option<&TextField> {
        self.filtering.then_some(&self.filter)
    }

    fn edit(&mut self, key: KeyEvent) -> Outcome {
        if !self.filtering {
            return Outcome::NoOp;
        }
        let edit = self.filter.handle_key(key);
        if edit.changed_text() {
            self.refilter();
        }
        match edit {
            TextEdit::Ignored => Outcome::NoOp,
            _ => Outcome::Handled,
        }
    }

    fn begin_edit(&mut self) -> Outcome {
        if self.filtering {
            return Outcome::NoOp;
        }
        self.filtering = true;
        Outcome::Handled
    }
}

impl Confirmable for TransactionList {
    /// Keep the typed filter and return focus to the list.
    fn confirm(&mut self, _fx: &mut Effects) -> Outcome {
        if !self.filtering {
            return Outcome::NoOp;
        }
        self.filtering = false;
        Outcome::Handled
    }

    fn cancel(&mut self, _fx: &mut Effects) -> Outcome {
        if !self.filtering {
            return Outcome::NoOp;
        }
        self.clear_filter();
        Outcome::Handled
    }
}

impl Context for TransactionList {
    fn id(&self) -> ContextId {
        self.id
    }

    fn scope(&self) -> Scope {
        if self.filtering {
            Scope::TransactionFilter
        } else {
            Scope::Transactions
        }
    }

    fn contract(&self) -> InteractionContract {
        if self.filtering {
            return InteractionContract::base(ContextKind::Workflow, Scope::TransactionFilter)
                .relabel(Action::Confirm, "keep filter")
                .relabel(Action::Cancel, "clear")
                .hint(Action::MoveDown, "down")
                .require(Action::MoveDown);
        }
        InteractionContract::base(ContextKind::List, Scope::Transactions)
            .omit(Action::Select)
            .omit(Action::Cancel)
            .hint(Action::Edit, "filter")
            .hint_command(Action::Select, "txn.view", "view")
            .hint_command(Action::Edit, "txn.categorize", "category")
            .hint_command(Action::Edit, "txn.tags", "tags")
            .hint(Action::NextTab, "next tab")
            .hint(Action::OpenPalette, "commands")
            .hint(Action::Help, "help")
            .hint(Action::Quit, "quit")
            .require(Action::Edit)
    }

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
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
    use crate::model::Category;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn txn(id: TransactionId, payee: &str, category: Option<u64>) -> Transaction {
        Transaction {
            id,
            date: "2024-03-01".into(),
            payee: payee.into(),
            amount_cents: -1250,
            category,
            tags: Vec::new(),
            memo: None,
        }
    }

    fn snapshot() -> Arc<DataSnapshot> {
        Arc::new(DataSnapshot {
            transactions: vec![
                txn(1, "Fresh Market", Some(1)),
                txn(2, "Joe's Diner", None),
                txn(3, "Jukebox Records", None),
            ],
            categories: vec![Category {
                id: 1,
                name: "Groceries".into(),
                group: None,
                keywords: Vec::new(),
            }],
            ..DataSnapshot::default()
        })
    }

    #[test]
    fn j_types_into_focused_filter_and_moves_otherwise() {
        let mut list = TransactionList::new(snapshot());
        assert_eq!(edit_key(&mut list, key(KeyCode::Char('j'))), None);

        assert_eq!(dispatch(&mut list, Action::Edit, &mut Effects::new()), Outcome::Handled);
        assert_eq!(list.scope(), Scope::TransactionFilter);
        assert_eq!(edit_key(&mut list, key(KeyCode::Char('j'))), Some(Outcome::Handled));
        assert_eq!(list.filter().value(), "j");
        let payees: Vec<_> = list.rows().map(|t| t.payee.as_str()).collect();
        assert_eq!(payees, vec!["Joe's Diner", "Jukebox Records"]);
    }

    #[test]
    fn filter_matches_category_names() {
        let mut list = TransactionList::new(snapshot());
        list.set_filter("grocer");
        assert_eq!(list.row_count(), 1);
        assert_eq!(list.selected_id(), Some(1));
        assert!(!list.is_filtering());
    }

    #[test]
    fn cancel_clears_and_confirm_keeps() {
        let mut list = TransactionList::new(snapshot());
        let mut fx = Effects::new();
        dispatch(&mut list, Action::Edit, &mut fx);
        edit_key(&mut list, key(KeyCode::Char('q')));
        assert_eq!(list.row_count(), 0);
        assert_eq!(dispatch(&mut list, Action::Cancel, &mut fx), Outcome::Handled);
        assert_eq!(list.row_count(), 3);
        assert_eq!(list.scope(), Scope::Transactions);

        dispatch(&mut list, Action::Edit, &mut fx);
        edit_key(&mut list, key(KeyCode::Char('o')));
        assert_eq!(dispatch(&mut list, Action::Confirm, &mut fx), Outcome::Handled);
        assert_eq!(list.filter().value(), "o");
        assert_eq!(list.row_count(), 3);
        assert_eq!(dispatch(&mut list, Action::Cancel, &mut fx), Outcome::NoOp);
    }

    #[test]
    fn selection_survives_reload() {
        let mut list = TransactionList::new(snapshot());
        list.navigate(Action::Bottom);
        list.set_data(snapshot());
        assert_eq!(list.selected_id(), Some(3));
    }
}
