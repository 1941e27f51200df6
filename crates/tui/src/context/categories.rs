//! Categories tab.

use std::sync::Arc;

use tally_config::constants::DEFAULT_PAGE_SIZE;

use crate::action::{Action, ContextId};
use crate::contract::{ContextKind, InteractionContract};
use crate::input::keymap::Scope;
use crate::model::{Category, DataSnapshot};

use super::{Context, ListCursor, Navigable, Outcome};

#[derive(Debug, Clone)]
pub struct CategoryList {
    id: ContextId,
    data: Arc<DataSnapshot>,
    cursor: ListCursor,
}

impl CategoryList {
    pub fn new(data: Arc<DataSnapshot>) -> Self {
        Self {
            id: ContextId::new(),
            cursor: ListCursor::new(data.categories.len(), DEFAULT_PAGE_SIZE),
            data,
        }
    }

    pub fn set_data(&mut self, data: Arc<DataSnapshot>) {
        let selected = self.selected().map(|c| c.id);
        self.cursor.set_len(data.categories.len());
        if let Some(pos) = selected.and_then(|id| data.categories.iter().position(|c| c.id == id)) {
            self.cursor.set_index(pos);
        }
        self.data = data;
    }

    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    /// Number of transactions filed under `category`.
    pub fn usage(&self, category: &Category) -> usize {
        self.data
            .transactions
            .iter()
            .filter(|t| t.category == Some(category.id))
            .count()
    }

    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    pub fn selected(&self) -> Option<&Category> {
        self.data.categories.get(self.cursor.index())
    }
}

impl Navigable for CategoryList {
    fn navigate(&mut self, action: Action) -> Outcome {
        self.cursor.navigate(action)
    }
}

impl Context for CategoryList {
    fn id(&self) -> ContextId {
        self.id
    }

    fn scope(&self) -> Scope {
        Scope::Categories
    }

    fn contract(&self) -> InteractionContract {
        InteractionContract::base(ContextKind::List, Scope::Categories)
            .omit(Action::Select)
            .omit(Action::Cancel)
            .hint_command(Action::Edit, "cat.new", "new")
            .hint_command(Action::Edit, "cat.rename", "rename")
            .hint_command(Action::Delete, "cat.delete", "delete")
            .hint(Action::NextTab, "next tab")
            .hint(Action::Help, "help")
    }

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transaction;

    fn category(id: u64, name: &str) -> Category {
        Category {
            id,
            name: name.into(),
            group: None,
            keywords: Vec::new(),
        }
    }

    #[test]
    fn selection_follows_category_across_reload() {
        let data = Arc::new(DataSnapshot {
            categories: vec![category(1, "Rent"), category(2, "Fuel")],
            ..DataSnapshot::default()
        });
        let mut list = CategoryList::new(data);
        list.navigate(Action::MoveDown);

        let reordered = Arc::new(DataSnapshot {
            categories: vec![category(0, "Books"), category(1, "Rent"), category(2, "Fuel")],
            ..DataSnapshot::default()
        });
        list.set_data(reordered);
        assert_eq!(list.selected().map(|c| c.name.as_str()), Some("Fuel"));
    }

    #[test]
    fn usage_counts_assigned_transactions() {
        let data = Arc::new(DataSnapshot {
            categories: vec![category(1, "Rent")],
            transactions: vec![Transaction {
                id: 9,
                date: "2024-01-01".into(),
                payee: "Landlord".into(),
                amount_cents: -100_000,
                category: Some(1),
                tags: Vec::new(),
                memo: None,
            }],
            ..DataSnapshot::default()
        });
        let list = CategoryList::new(data);
        let rent = &list.categories()[0];
        assert_eq!(list.usage(rent), 1);
    }
}
