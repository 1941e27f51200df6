//! Ordered, guarded overlay table.
//!
//! Responsibilities:
//! - Hold overlay entries sorted by precedence rank.
//! - Resolve the single active entry for a state (first true guard), which
//!   names both the scope for binding lookup and the handler for dispatch.
//!
//! Does NOT handle:
//! - Defining the application's table (see `app::precedence`).
//! - Owning context state; guards only read it.
//!
//! Invariants:
//! - Names and ranks are unique; violations fail construction.
//! - For every reachable state at most one guard is true. This is a
//!   construction-time property checked by tests with `matching`, not a
//!   runtime condition.

use std::collections::HashSet;

use thiserror::Error;

use crate::input::keymap::Scope;

/// A guarded overlay. Lower rank wins.
///
/// `handler` identifies which part of `S` receives input while the entry is
/// active; the caller maps it to a concrete handler.
pub struct OverlayEntry<S, H> {
    pub name: &'static str,
    pub rank: u16,
    pub scope: Scope,
    pub handler: H,
    guard: fn(&S) -> bool,
}

impl<S, H> OverlayEntry<S, H> {
    pub fn new(
        name: &'static str,
        rank: u16,
        scope: Scope,
        handler: H,
        guard: fn(&S) -> bool,
    ) -> Self {
        Self {
            name,
            rank,
            scope,
            handler,
            guard,
        }
    }

    pub fn is_active(&self, state: &S) -> bool {
        (self.guard)(state)
    }
}

impl<S, H: std::fmt::Debug> std::fmt::Debug for OverlayEntry<S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayEntry")
            .field("name", &self.name)
            .field("rank", &self.rank)
            .field("scope", &self.scope)
            .field("handler", &self.handler)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OverlayError {
    #[error("overlay '{0}' declared twice")]
    DuplicateName(&'static str),
    #[error("overlays '{first}' and '{second}' share rank {rank}")]
    DuplicateRank {
        rank: u16,
        first: &'static str,
        second: &'static str,
    },
}

#[derive(Debug)]
pub struct OverlayStack<S, H> {
    entries: Vec<OverlayEntry<S, H>>,
}

impl<S, H: Copy> OverlayStack<S, H> {
    pub fn new(mut entries: Vec<OverlayEntry<S, H>>) -> Result<Self, OverlayError> {
        let mut names = HashSet::new();
        for entry in &entries {
            if !names.insert(entry.name) {
                return Err(OverlayError::DuplicateName(entry.name));
            }
        }
        entries.sort_by_key(|e| e.rank);
        if let Some(pair) = entries.windows(2).find(|w| w[0].rank == w[1].rank) {
            return Err(OverlayError::DuplicateRank {
                rank: pair[0].rank,
                first: pair[0].name,
                second: pair[1].name,
            });
        }
        Ok(Self { entries })
    }

    /// The highest-precedence entry whose guard holds.
    pub fn resolve(&self, state: &S) -> Option<&OverlayEntry<S, H>> {
        self.entries.iter().find(|e| e.is_active(state))
    }

    /// Scope and handler for `state`, or `base` when no guard holds.
    pub fn resolve_or(&self, state: &S, base: (Scope, H)) -> (Scope, H) {
        self.resolve(state)
            .map(|e| (e.scope, e.handler))
            .unwrap_or(base)
    }

    /// Names of every entry whose guard holds, in precedence order.
    pub fn matching(&self, state: &S) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|e| e.is_active(state))
            .map(|e| e.name)
            .collect()
    }

    pub fn entries(&self) -> &[OverlayEntry<S, H>] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Flags {
        modal: bool,
        search: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Target {
        Base,
        Modal,
        Search,
    }

    fn stack() -> OverlayStack<Flags, Target> {
        OverlayStack::new(vec![
            OverlayEntry::new("search", 20, Scope::TransactionFilter, Target::Search, |s: &Flags| {
                s.search
            }),
            OverlayEntry::new("modal", 10, Scope::Confirm, Target::Modal, |s: &Flags| s.modal),
        ])
        .unwrap()
    }

    #[test]
    fn resolves_by_rank_not_declaration_order() {
        let state = Flags {
            modal: true,
            search: true,
        };
        let stack = stack();
        assert_eq!(stack.resolve(&state).map(|e| e.name), Some("modal"));
        assert_eq!(stack.matching(&state), vec!["modal", "search"]);
    }

    #[test]
    fn no_guard_means_base_scope() {
        assert!(stack().resolve(&Flags::default()).is_none());
        assert_eq!(
            stack().resolve_or(&Flags::default(), (Scope::Transactions, Target::Base)),
            (Scope::Transactions, Target::Base)
        );
    }

    #[test]
    fn resolution_pairs_scope_with_handler() {
        let state = Flags {
            modal: false,
            search: true,
        };
        assert_eq!(
            stack().resolve_or(&state, (Scope::Transactions, Target::Base)),
            (Scope::TransactionFilter, Target::Search)
        );
    }

    #[test]
    fn duplicate_rank_is_rejected() {
        let err = OverlayStack::new(vec![
            OverlayEntry::new("a", 1, Scope::Confirm, Target::Modal, |_: &Flags| false),
            OverlayEntry::new("b", 1, Scope::Viewer, Target::Modal, |_: &Flags| false),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            OverlayError::DuplicateRank {
                rank: 1,
                first: "a",
                second: "b"
            }
        );
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = OverlayStack::new(vec![
            OverlayEntry::new("a", 1, Scope::Confirm, Target::Modal, |_: &Flags| false),
            OverlayEntry::new("a", 2, Scope::Viewer, Target::Modal, |_: &Flags| false),
        ])
        .unwrap_err();
        assert_eq!(err, OverlayError::DuplicateName("a"));
    }
}
