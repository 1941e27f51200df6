//! The application's overlay precedence table.
//!
//! Most specific modal first, base views last. Overlays are a tagged union,
//! so at most one overlay guard can hold; the filter guard additionally
//! requires that no overlay is open.
//!
//! Each entry also names its `Handler`, so one resolution decides both the
//! scope used for binding lookup and the context that receives the action.

use crate::context::Overlay;
use crate::input::keymap::Scope;
use crate::overlay::{OverlayEntry, OverlayError, OverlayStack};

use super::state::{AppState, Tab};

/// Which context owns input for a resolved entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// The open overlay's context.
    Overlay,
    /// The current tab's context.
    Tab,
}

pub type PrecedenceTable = OverlayStack<AppState, Handler>;

fn filter_focused(state: &AppState) -> bool {
    state.overlay.is_none() && state.tab == Tab::Transactions && state.transactions.is_filtering()
}

fn modal(
    name: &'static str,
    rank: u16,
    scope: Scope,
    guard: fn(&AppState) -> bool,
) -> OverlayEntry<AppState, Handler> {
    OverlayEntry::new(name, rank, scope, Handler::Overlay, guard)
}

pub fn table() -> Result<PrecedenceTable, OverlayError> {
    OverlayStack::new(vec![
        modal("confirm", 10, Scope::Confirm, |s: &AppState| {
            matches!(s.overlay, Some(Overlay::Confirm(_)))
        }),
        modal("category_editor", 20, Scope::CategoryEditor, |s: &AppState| {
            matches!(s.overlay, Some(Overlay::CategoryEditor(_)))
        }),
        modal("category_picker", 30, Scope::CategoryPicker, |s: &AppState| {
            matches!(s.overlay, Some(Overlay::CategoryPicker(_)))
        }),
        modal("tag_picker", 40, Scope::TagPicker, |s: &AppState| {
            matches!(s.overlay, Some(Overlay::TagPicker(_)))
        }),
        modal("command_palette", 50, Scope::CommandPalette, |s: &AppState| {
            matches!(s.overlay, Some(Overlay::Palette(_)))
        }),
        modal("dedup_review", 60, Scope::DedupReview, |s: &AppState| {
            matches!(s.overlay, Some(Overlay::DedupReview(_)))
        }),
        modal("viewer", 70, Scope::Viewer, |s: &AppState| {
            matches!(s.overlay, Some(Overlay::Viewer(_)))
        }),
        modal("help", 80, Scope::Help, |s: &AppState| {
            matches!(s.overlay, Some(Overlay::Help(_)))
        }),
        OverlayEntry::new(
            "transaction_filter",
            90,
            Scope::TransactionFilter,
            Handler::Tab,
            filter_focused,
        ),
    ])
}
