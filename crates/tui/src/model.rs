//! Data records received from the storage collaborator.
//!
//! These are read-only views: the interaction core never mutates them
//! directly. Changes go out as `Invocation`s and come back as a fresh
//! `DataSnapshot`.

use serde::{Deserialize, Serialize};

pub type TransactionId = u64;
pub type CategoryId = u64;
pub type FilterId = u64;
pub type GroupId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: String,
    pub payee: String,
    /// Signed amount in cents; negative values are spending.
    pub amount_cents: i64,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

impl Transaction {
    pub fn amount_display(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Display group, used as the picker section.
    #[serde(default)]
    pub group: Option<String>,
    /// Free-form keywords matched by the picker query.
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFilter {
    pub id: FilterId,
    pub name: String,
    pub query: String,
}

/// A set of transactions the dedup collaborator believes are the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub id: GroupId,
    pub transactions: Vec<TransactionId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSnapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub saved_filters: Vec<SavedFilter>,
}

impl DataSnapshot {
    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_name(&self, id: Option<CategoryId>) -> &str {
        id.and_then(|id| self.category(id))
            .map(|c| c.name.as_str())
            .unwrap_or("Uncategorized")
    }

    pub fn saved_filter(&self, id: FilterId) -> Option<&SavedFilter> {
        self.saved_filters.iter().find(|f| f.id == id)
    }
}
