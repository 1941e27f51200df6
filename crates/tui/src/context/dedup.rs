//! Duplicate detection: the tab listing groups, and the step-through review.

use std::sync::Arc;

use tally_config::constants::DEFAULT_PAGE_SIZE;

use crate::action::{Action, ContextId, Invocation};
use crate::contract::{ContextKind, InteractionContract};
use crate::input::keymap::Scope;
use crate::model::{DataSnapshot, DuplicateGroup, GroupId, Transaction};
use crate::status::Status;

use super::{Confirmable, Context, Effects, ListCursor, Navigable, Outcome};

#[derive(Debug, Clone)]
pub struct DedupList {
    id: ContextId,
    data: Arc<DataSnapshot>,
    groups: Vec<DuplicateGroup>,
    cursor: ListCursor,
    scanning: bool,
    scanned: bool,
}

impl DedupList {
    pub fn new(data: Arc<DataSnapshot>) -> Self {
        Self {
            id: ContextId::new(),
            data,
            groups: Vec::new(),
            cursor: ListCursor::new(0, DEFAULT_PAGE_SIZE),
            scanning: false,
            scanned: false,
        }
    }

    pub fn set_data(&mut self, data: Arc<DataSnapshot>) {
        self.data = data;
    }

    pub fn data(&self) -> &DataSnapshot {
        &self.data
    }

    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    pub fn set_groups(&mut self, groups: Vec<DuplicateGroup>) {
        self.scanning = false;
        self.scanned = true;
        self.cursor.set_len(groups.len());
        self.groups = groups;
    }

    pub fn begin_scan(&mut self) {
        self.scanning = true;
    }

    pub fn scan_failed(&mut self) {
        self.scanning = false;
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    pub fn has_scanned(&self) -> bool {
        self.scanned
    }

    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    pub fn selected_index(&self) -> Option<usize> {
        (!self.groups.is_empty()).then(|| self.cursor.index())
    }
}

impl Navigable for DedupList {
    fn navigate(&mut self, action: Action) -> Outcome {
        self.cursor.navigate(action)
    }
}

impl Context for DedupList {
    fn id(&self) -> ContextId {
        self.id
    }

    fn scope(&self) -> Scope {
        Scope::Dedup
    }

    fn contract(&self) -> InteractionContract {
        InteractionContract::base(ContextKind::List, Scope::Dedup)
            .omit(Action::Select)
            .omit(Action::Cancel)
            .hint_command(Action::Apply, "dedup.scan", "scan")
            .hint_command(Action::Select, "dedup.review", "review")
            .hint(Action::NextTab, "next tab")
            .hint(Action::Help, "help")
    }

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        Some(self)
    }
}

/// Walks duplicate groups one at a time.
///
/// Resolutions are issued under the owning list's id so they still land
/// after the review closes.
#[derive(Debug, Clone)]
pub struct DedupReview {
    id: ContextId,
    owner: ContextId,
    data: Arc<DataSnapshot>,
    groups: Vec<DuplicateGroup>,
    index: usize,
    resolved: usize,
}

impl DedupReview {
    pub fn new(owner: ContextId, data: Arc<DataSnapshot>, groups: Vec<DuplicateGroup>, start: usize) -> Self {
        Self {
            id: ContextId::new(),
            owner,
            data,
            index: start.min(groups.len().saturating_sub(1)),
            groups,
            resolved: 0,
        }
    }

    pub fn current(&self) -> Option<&DuplicateGroup> {
        self.groups.get(self.index)
    }

    /// Members of the current group that exist in the snapshot.
    pub fn members(&self) -> Vec<&Transaction> {
        self.current()
            .map(|g| {
                g.transactions
                    .iter()
                    .filter_map(|&id| self.data.transaction(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// One-based position and total, for the title.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.groups.len())
    }

    fn advance(&mut self, fx: &mut Effects) -> Outcome {
        if self.index + 1 >= self.groups.len() {
            fx.status(Status::info(format!(
                "Review finished: {} group(s) resolved",
                self.resolved
            )));
            return Outcome::Close;
        }
        self.index += 1;
        Outcome::Handled
    }

    fn resolve(&mut self, fx: &mut Effects, keep_first: bool) -> Outcome {
        let Some(group) = self.current() else {
            return Outcome::Close;
        };
        let group_id: GroupId = group.id;
        let keep = if keep_first {
            group.transactions.first().copied()
        } else {
            None
        };
        fx.request(self.owner, Invocation::ResolveDuplicate { group: group_id, keep });
        self.resolved += 1;
        self.advance(fx)
    }
}

impl Navigable for DedupReview {
    fn navigate(&mut self, action: Action) -> Outcome {
        match action {
            Action::MoveDown => self.advance(&mut Effects::new()),
            Action::MoveUp if self.index > 0 => {
                self.index -= 1;
                Outcome::Handled
            }
            _ => Outcome::NoOp,
        }
    }
}

impl Confirmable for DedupReview {
    /// Merge, keeping the first transaction.
    fn confirm(&mut self, fx: &mut Effects) -> Outcome {
        self.resolve(fx, true)
    }

    fn cancel(&mut self, _fx: &mut Effects) -> Outcome {
        Outcome::Close
    }

    /// Mark the group as not duplicates.
    fn apply(&mut self, fx: &mut Effects) -> Outcome {
        self.resolve(fx, false)
    }
}

impl Context for DedupReview {
    fn id(&self) -> ContextId {
        self.id
    }

    fn scope(&self) -> Scope {
        Scope::DedupReview
    }

    fn contract(&self) -> InteractionContract {
        InteractionContract::base(ContextKind::Workflow, Scope::DedupReview)
            .relabel(Action::Confirm, "merge")
            .relabel(Action::Cancel, "close")
            .hint(Action::Apply, "keep both")
            .hint(Action::MoveDown, "skip")
            .require(Action::Apply)
            .require(Action::MoveDown)
    }

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        Some(self)
    }

    fn confirmable(&mut self) -> Option<&mut dyn Confirmable> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::dispatch;

    fn groups() -> Vec<DuplicateGroup> {
        vec![
            DuplicateGroup {
                id: 10,
                transactions: vec![1, 2],
            },
            DuplicateGroup {
                id: 11,
                transactions: vec![3, 4],
            },
        ]
    }

    #[test]
    fn merge_keeps_first_and_advances() {
        let owner = ContextId::new();
        let mut review = DedupReview::new(owner, Arc::default(), groups(), 0);
        let mut fx = Effects::new();
        assert_eq!(dispatch(&mut review, Action::Confirm, &mut fx), Outcome::Handled);
        assert_eq!(review.position(), (2, 2));
        assert_eq!(
            fx.requests()[0].invocation,
            Invocation::ResolveDuplicate {
                group: 10,
                keep: Some(1)
            }
        );
        assert_eq!(fx.requests()[0].context, owner);

        assert_eq!(dispatch(&mut review, Action::Apply, &mut fx), Outcome::Close);
        assert_eq!(
            fx.requests()[1].invocation,
            Invocation::ResolveDuplicate { group: 11, keep: None }
        );
    }

    #[test]
    fn skip_issues_nothing() {
        let mut review = DedupReview::new(ContextId::new(), Arc::default(), groups(), 0);
        let mut fx = Effects::new();
        assert_eq!(dispatch(&mut review, Action::MoveDown, &mut fx), Outcome::Handled);
        assert_eq!(dispatch(&mut review, Action::MoveUp, &mut fx), Outcome::Handled);
        assert_eq!(dispatch(&mut review, Action::MoveUp, &mut fx), Outcome::NoOp);
        assert!(fx.requests().is_empty());
    }

    #[test]
    fn scan_results_reset_scanning() {
        let mut list = DedupList::new(Arc::default());
        list.begin_scan();
        assert!(list.is_scanning());
        list.set_groups(groups());
        assert!(!list.is_scanning());
        assert!(list.has_scanned());
        assert_eq!(list.selected_index(), Some(0));
    }
}
