//! Application state owned by the event loop.
//!
//! Responsibilities:
//! - Hold the current snapshot, the three tab contexts, the single optional
//!   overlay and the status line.
//! - Answer which context is active and whether a completion is still live.
//!
//! Does NOT handle:
//! - Key resolution or command execution (see `App`).
//!
//! Invariants:
//! - At most one overlay exists; opening one replaces any other.
//! - Tab contexts live as long as the app; their ids never go stale.

use std::sync::Arc;

use crate::action::ContextId;
use crate::context::{CategoryList, Context, DedupList, Overlay, TransactionList};
use crate::input::keymap::Scope;
use crate::model::DataSnapshot;
use crate::picker::MatchMode;
use crate::status::Status;

use super::precedence::Handler;

/// Top-level tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Transactions,
    Categories,
    Dedup,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Self::Transactions, Self::Categories, Self::Dedup];

    pub fn title(self) -> &'static str {
        match self {
            Self::Transactions => "Transactions",
            Self::Categories => "Categories",
            Self::Dedup => "Duplicates",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Transactions => 0,
            Self::Categories => 1,
            Self::Dedup => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug)]
pub struct AppState {
    pub data: Arc<DataSnapshot>,
    pub tab: Tab,
    pub transactions: TransactionList,
    pub categories: CategoryList,
    pub dedup: DedupList,
    pub overlay: Option<Overlay>,
    pub status: Option<Status>,
    pub match_mode: MatchMode,
    pub loading: bool,
    pub viewport: (u16, u16),
    pub quit: bool,
}

impl AppState {
    pub fn new(match_mode: MatchMode) -> Self {
        let data = Arc::new(DataSnapshot::default());
        Self {
            transactions: TransactionList::new(Arc::clone(&data)),
            categories: CategoryList::new(Arc::clone(&data)),
            dedup: DedupList::new(Arc::clone(&data)),
            data,
            tab: Tab::default(),
            overlay: None,
            status: None,
            match_mode,
            loading: true,
            viewport: (0, 0),
            quit: false,
        }
    }

    /// Replace the snapshot everywhere it is held.
    pub fn set_data(&mut self, data: DataSnapshot) {
        let data = Arc::new(data);
        self.transactions.set_data(Arc::clone(&data));
        self.categories.set_data(Arc::clone(&data));
        self.dedup.set_data(Arc::clone(&data));
        self.data = data;
        self.loading = false;
    }

    pub fn tab_context(&self) -> &dyn Context {
        match self.tab {
            Tab::Transactions => &self.transactions,
            Tab::Categories => &self.categories,
            Tab::Dedup => &self.dedup,
        }
    }

    pub fn tab_context_mut(&mut self) -> &mut dyn Context {
        match self.tab {
            Tab::Transactions => &mut self.transactions,
            Tab::Categories => &mut self.categories,
            Tab::Dedup => &mut self.dedup,
        }
    }

    /// The context a resolved precedence entry names.
    pub fn context(&self, handler: Handler) -> &dyn Context {
        match &self.overlay {
            Some(overlay) if handler == Handler::Overlay => overlay.context(),
            _ => self.tab_context(),
        }
    }

    pub fn context_mut(&mut self, handler: Handler) -> &mut dyn Context {
        // Borrow fields disjointly so the overlay borrow does not conflict
        // with the tab fallback.
        match &mut self.overlay {
            Some(overlay) if handler == Handler::Overlay => overlay.context_mut(),
            _ => match self.tab {
                Tab::Transactions => &mut self.transactions,
                Tab::Categories => &mut self.categories,
                Tab::Dedup => &mut self.dedup,
            },
        }
    }

    /// Scope of the tab beneath any overlay.
    pub fn base_scope(&self) -> Scope {
        self.tab_context().scope()
    }

    /// Whether completions addressed to `id` should still be applied.
    pub fn is_live(&self, id: ContextId) -> bool {
        id == self.transactions.id()
            || id == self.categories.id()
            || id == self.dedup.id()
            || self.overlay.as_ref().is_some_and(|o| o.id() == id)
    }

    pub fn open(&mut self, overlay: Overlay) {
        if let Some(previous) = self.overlay.replace(overlay) {
            tracing::debug!(closed = previous.name(), "Overlay replaced");
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }
}
