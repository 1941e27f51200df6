//! In-memory collaborator backed by an embedded seed ledger.
//!
//! Responsibilities:
//! - Serve every `Invocation` against a mutable copy of the seed data.
//! - Detect duplicate groups (same date, payee and amount) and suggest
//!   categories from keywords and payee history.
//!
//! Does NOT handle:
//! - Persistence. Quitting discards all changes; `ResetData` restores the seed.
//!
//! Invariants:
//! - Every mutation answers with a full fresh snapshot.
//! - Group ids are the lowest transaction id in the group, so they stay
//!   stable across scans while the group is unchanged.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::sync::Mutex;

use crate::action::{Invocation, Payload};
use crate::model::{CategoryId, DataSnapshot, DuplicateGroup, Transaction, TransactionId};
use crate::picker::Patch;

use super::collaborator::{Collaborator, CollaboratorError};

const SEED: &str = include_str!("demo_seed.json");

/// Suggestions returned per request.
const MAX_SUGGESTIONS: usize = 3;

pub fn seed() -> Result<DataSnapshot, serde_json::Error> {
    serde_json::from_str(SEED)
}

#[derive(Debug)]
struct Store {
    data: DataSnapshot,
    /// Groups the user chose to keep, by member ids.
    dismissed: BTreeSet<Vec<TransactionId>>,
}

pub struct DemoCollaborator {
    seed: DataSnapshot,
    store: Mutex<Store>,
    latency: Duration,
}

impl DemoCollaborator {
    pub fn new(latency: Duration) -> Result<Self, serde_json::Error> {
        Ok(Self::with_data(seed()?, latency))
    }

    pub fn with_data(data: DataSnapshot, latency: Duration) -> Self {
        Self {
            store: Mutex::new(Store {
                data: data.clone(),
                dismissed: BTreeSet::new(),
            }),
            seed: data,
            latency,
        }
    }

    async fn handle(&self, invocation: Invocation) -> Result<Payload, CollaboratorError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let mut store = self.store.lock().await;
        if invocation == Invocation::ResetData {
            store.data = self.seed.clone();
            store.dismissed.clear();
            return Ok(Payload::Snapshot(store.data.clone()));
        }
        store.apply(invocation)
    }
}

impl Collaborator for DemoCollaborator {
    fn call(&self, invocation: Invocation) -> BoxFuture<'_, Result<Payload, CollaboratorError>> {
        Box::pin(self.handle(invocation))
    }
}

fn duplicate_key(txn: &Transaction) -> (String, String, i64) {
    (txn.date.clone(), txn.payee.to_lowercase(), txn.amount_cents)
}

impl Store {
    fn apply(&mut self, invocation: Invocation) -> Result<Payload, CollaboratorError> {
        match invocation {
            Invocation::LoadSnapshot | Invocation::ResetData => {}
            Invocation::SetCategory {
                transaction,
                category,
            } => {
                self.category(category)?;
                self.transaction_mut(transaction)?.category = Some(category);
            }
            Invocation::PersistTagPatch { transaction, patch } => {
                self.patch_tags(transaction, &patch)?;
            }
            Invocation::CreateCategory { name } => {
                let name = self.check_name(&name, None)?;
                let id = self.data.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
                self.data.categories.push(crate::model::Category {
                    id,
                    name,
                    group: None,
                    keywords: Vec::new(),
                });
            }
            Invocation::RenameCategory { category, name } => {
                let name = self.check_name(&name, Some(category))?;
                self.category(category)?;
                if let Some(c) = self.data.categories.iter_mut().find(|c| c.id == category) {
                    c.name = name;
                }
            }
            Invocation::DeleteCategory { category } => {
                self.category(category)?;
                self.data.categories.retain(|c| c.id != category);
                for txn in &mut self.data.transactions {
                    if txn.category == Some(category) {
                        txn.category = None;
                    }
                }
            }
            Invocation::RunDedupScan => return Ok(Payload::Duplicates(self.duplicate_groups())),
            Invocation::ResolveDuplicate { group, keep } => {
                self.resolve(group, keep)?;
                return Ok(Payload::Duplicates(self.duplicate_groups()));
            }
            Invocation::SuggestCategories { transaction } => {
                return Ok(Payload::Suggestions(self.suggest(transaction)?));
            }
            Invocation::ApplySavedFilter { filter } => {
                let filter = self
                    .data
                    .saved_filter(filter)
                    .ok_or_else(|| CollaboratorError::NotFound(format!("saved filter {filter}")))?;
                return Ok(Payload::Done(format!("Filter \"{}\" applied", filter.name)));
            }
        }
        Ok(Payload::Snapshot(self.data.clone()))
    }

    fn category(&self, id: CategoryId) -> Result<&crate::model::Category, CollaboratorError> {
        self.data
            .category(id)
            .ok_or_else(|| CollaboratorError::NotFound(format!("category {id}")))
    }

    fn transaction_mut(&mut self, id: TransactionId) -> Result<&mut Transaction, CollaboratorError> {
        self.data
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CollaboratorError::NotFound(format!("transaction {id}")))
    }

    /// Trimmed name, rejected when empty or already taken by another category.
    fn check_name(&self, name: &str, renaming: Option<CategoryId>) -> Result<String, CollaboratorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CollaboratorError::Rejected("category name is empty".into()));
        }
        let taken = self
            .data
            .categories
            .iter()
            .any(|c| Some(c.id) != renaming && c.name.eq_ignore_ascii_case(name));
        if taken {
            return Err(CollaboratorError::Rejected(format!("category \"{name}\" already exists")));
        }
        Ok(name.to_string())
    }

    fn patch_tags(&mut self, transaction: TransactionId, patch: &Patch) -> Result<(), CollaboratorError> {
        let txn = self.transaction_mut(transaction)?;
        txn.tags.retain(|t| !patch.removed.contains(t));
        for tag in &patch.added {
            if !txn.tags.contains(tag) {
                txn.tags.push(tag.clone());
            }
        }
        for tag in &patch.added {
            if !self.data.tags.contains(tag) {
                self.data.tags.push(tag.clone());
            }
        }
        self.data.tags.sort();
        Ok(())
    }

    fn duplicate_groups(&self) -> Vec<DuplicateGroup> {
        let mut buckets: BTreeMap<(String, String, i64), Vec<TransactionId>> = BTreeMap::new();
        for txn in &self.data.transactions {
            buckets.entry(duplicate_key(txn)).or_default().push(txn.id);
        }
        let mut groups: Vec<DuplicateGroup> = buckets
            .into_values()
            .filter(|ids| ids.len() > 1)
            .map(|mut ids| {
                ids.sort_unstable();
                ids
            })
            .filter(|ids| !self.dismissed.contains(ids))
            .map(|ids| DuplicateGroup {
                id: ids[0],
                transactions: ids,
            })
            .collect();
        groups.sort_by_key(|g| g.id);
        groups
    }

    fn resolve(&mut self, group: u64, keep: Option<TransactionId>) -> Result<(), CollaboratorError> {
        let members = self
            .duplicate_groups()
            .into_iter()
            .find(|g| g.id == group)
            .map(|g| g.transactions)
            .ok_or_else(|| CollaboratorError::NotFound(format!("duplicate group {group}")))?;
        match keep {
            Some(keep) if members.contains(&keep) => {
                self.data
                    .transactions
                    .retain(|t| t.id == keep || !members.contains(&t.id));
                tracing::debug!(group, keep, removed = members.len() - 1, "Merged duplicate group");
            }
            Some(keep) => {
                return Err(CollaboratorError::Rejected(format!(
                    "transaction {keep} is not in group {group}"
                )));
            }
            None => {
                self.dismissed.insert(members);
            }
        }
        Ok(())
    }

    /// Keyword matches first, then categories used by the same payee.
    fn suggest(&self, transaction: TransactionId) -> Result<Vec<CategoryId>, CollaboratorError> {
        let txn = self
            .data
            .transaction(transaction)
            .ok_or_else(|| CollaboratorError::NotFound(format!("transaction {transaction}")))?;
        let payee = txn.payee.to_lowercase();

        let by_keyword = self.data.categories.iter().filter(|c| {
            c.keywords.iter().any(|k| payee.contains(&k.to_lowercase()))
        });
        let by_history = self
            .data
            .transactions
            .iter()
            .filter(|t| t.id != txn.id && t.payee.eq_ignore_ascii_case(&txn.payee))
            .filter_map(|t| t.category.and_then(|id| self.data.category(id)));

        let mut out = Vec::new();
        for category in by_keyword.chain(by_history) {
            if Some(category.id) != txn.category && !out.contains(&category.id) {
                out.push(category.id);
            }
            if out.len() == MAX_SUGGESTIONS {
                break;
            }
        }
        Ok(out)
    }
}
