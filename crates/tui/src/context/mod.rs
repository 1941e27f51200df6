//! Interaction contexts and capability dispatch.
//!
//! Responsibilities:
//! - Define the `Context` trait every interactive surface implements, and
//!   the four capabilities a context may opt into: `Navigable`,
//!   `Selectable`, `Editable`, `Confirmable`.
//! - Route a semantic `Action` to the capability that handles it.
//! - Define `Overlay`, the single live modal instance (a tagged union).
//!
//! Does NOT handle:
//! - Choosing which context is active (see `app::precedence`).
//! - Running commands; contexts ask for that with `Outcome::Run`.
//! - I/O. Contexts emit `Request`s into `Effects` and never wait for them.
//!
//! Invariants:
//! - A context without a capability answers that capability's actions with
//!   `Outcome::NoOp`; nothing leaks to another context.
//! - Every context produces exactly one `InteractionContract` per render.

use crossterm::event::KeyEvent;

use crate::action::{Action, ContextId, Invocation, Request};
use crate::contract::InteractionContract;
use crate::input::keymap::Scope;
use crate::status::Status;
use crate::text_field::TextField;

pub mod categories;
pub mod confirm;
pub mod dedup;
pub mod editor;
pub mod palette;
pub mod picker;
pub mod transactions;
pub mod viewer;

pub use categories::CategoryList;
pub use confirm::ConfirmContext;
pub use dedup::{DedupList, DedupReview};
pub use editor::CategoryEditor;
pub use palette::{PaletteContext, PaletteEntry};
pub use picker::{PickerContext, PickerPurpose, SuggestionState};
pub use transactions::TransactionList;
pub use viewer::ViewerContext;

/// What handling an action or key did to the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed.
    NoOp,
    /// State changed; the context stays open.
    Handled,
    /// The context is finished and must be dropped.
    Close,
    /// Close the context, then run the command with this id.
    Run(String),
}

impl Outcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// Side effects collected while handling one event.
#[derive(Debug, Default)]
pub struct Effects {
    requests: Vec<Request>,
    status: Option<Status>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, context: ContextId, invocation: Invocation) {
        self.requests.push(Request::new(context, invocation));
    }

    pub fn push(&mut self, request: Request) {
        self.requests.push(request);
    }

    /// Set the status line. The last call wins.
    pub fn status(&mut self, status: Status) {
        self.status = Some(status);
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn status_message(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn into_parts(self) -> (Vec<Request>, Option<Status>) {
        (self.requests, self.status)
    }
}

pub trait Navigable {
    fn navigate(&mut self, action: Action) -> Outcome;
}

pub trait Selectable {
    fn select(&mut self, fx: &mut Effects) -> Outcome;

    fn toggle(&mut self) -> Outcome {
        Outcome::NoOp
    }

    fn clear_mark(&mut self) -> Outcome {
        Outcome::NoOp
    }
}

pub trait Editable {
    /// The focused field, if any.
    fn field(&self) -> Option<&TextField>;

    /// Whether the focused field consumes `key` ahead of binding lookup.
    fn claims(&self, key: KeyEvent) -> bool {
        self.field().is_some_and(|field| field.claims(key))
    }

    fn edit(&mut self, key: KeyEvent) -> Outcome;

    fn begin_edit(&mut self) -> Outcome {
        Outcome::NoOp
    }

    fn save(&mut self, _fx: &mut Effects) -> Outcome {
        Outcome::NoOp
    }
}

pub trait Confirmable {
    fn confirm(&mut self, fx: &mut Effects) -> Outcome;

    fn cancel(&mut self, fx: &mut Effects) -> Outcome;

    fn apply(&mut self, _fx: &mut Effects) -> Outcome {
        Outcome::NoOp
    }
}

/// An interactive surface that can own input.
pub trait Context {
    /// Correlation id for requests this context issues.
    fn id(&self) -> ContextId;

    fn scope(&self) -> Scope;

    fn contract(&self) -> InteractionContract;

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        None
    }

    fn selectable(&mut self) -> Option<&mut dyn Selectable> {
        None
    }

    fn editable(&self) -> Option<&dyn Editable> {
        None
    }

    fn editable_mut(&mut self) -> Option<&mut dyn Editable> {
        None
    }

    fn confirmable(&mut self) -> Option<&mut dyn Confirmable> {
        None
    }
}

/// Route `action` to the capability that owns it.
pub fn dispatch(ctx: &mut dyn Context, action: Action, fx: &mut Effects) -> Outcome {
    let outcome = match action {
        a if a.is_motion() => ctx.navigable().map(|n| n.navigate(a)),
        Action::Select => ctx.selectable().map(|s| s.select(fx)),
        Action::Toggle => ctx.selectable().map(|s| s.toggle()),
        Action::Delete => ctx.selectable().map(|s| s.clear_mark()),
        Action::Edit => ctx.editable_mut().map(|e| e.begin_edit()),
        Action::Save => ctx.editable_mut().map(|e| e.save(fx)),
        Action::Confirm => ctx.confirmable().map(|c| c.confirm(fx)),
        Action::Cancel => ctx.confirmable().map(|c| c.cancel(fx)),
        Action::Apply => ctx.confirmable().map(|c| c.apply(fx)),
        _ => None,
    };
    outcome.unwrap_or(Outcome::NoOp)
}

/// Give the focused text field first refusal on `key`.
///
/// Returns `None` when no field claims the key, so binding lookup proceeds.
pub fn edit_key(ctx: &mut dyn Context, key: KeyEvent) -> Option<Outcome> {
    if !ctx.editable().is_some_and(|e| e.claims(key)) {
        return None;
    }
    ctx.editable_mut().map(|e| e.edit(key))
}

/// Cursor over a list of `len` rows, shared by list-shaped contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCursor {
    index: usize,
    len: usize,
    page: usize,
}

impl ListCursor {
    pub fn new(len: usize, page: usize) -> Self {
        Self {
            index: 0,
            len,
            page: page.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Change the row count, clamping the index.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.index = self.index.min(len.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index.min(self.len.saturating_sub(1));
    }

    pub fn navigate(&mut self, action: Action) -> Outcome {
        let last = self.len.saturating_sub(1);
        let target = match action {
            Action::MoveDown => self.index.saturating_add(1),
            Action::MoveUp => self.index.saturating_sub(1),
            Action::PageDown => self.index.saturating_add(self.page),
            Action::PageUp => self.index.saturating_sub(self.page),
            Action::Top => 0,
            Action::Bottom => last,
            _ => return Outcome::NoOp,
        }
        .min(last);
        if target == self.index {
            Outcome::NoOp
        } else {
            self.index = target;
            Outcome::Handled
        }
    }
}

/// The one modal context that may be open above the tabs.
#[derive(Debug)]
pub enum Overlay {
    Confirm(ConfirmContext),
    CategoryEditor(CategoryEditor),
    CategoryPicker(PickerContext),
    TagPicker(PickerContext),
    Palette(PaletteContext),
    DedupReview(DedupReview),
    Viewer(ViewerContext),
    Help(ViewerContext),
}

impl Overlay {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Confirm(_) => "confirm",
            Self::CategoryEditor(_) => "category_editor",
            Self::CategoryPicker(_) => "category_picker",
            Self::TagPicker(_) => "tag_picker",
            Self::Palette(_) => "command_palette",
            Self::DedupReview(_) => "dedup_review",
            Self::Viewer(_) => "viewer",
            Self::Help(_) => "help",
        }
    }

    pub fn context(&self) -> &dyn Context {
        match self {
            Self::Confirm(c) => c,
            Self::CategoryEditor(c) => c,
            Self::CategoryPicker(c) | Self::TagPicker(c) => c,
            Self::Palette(c) => c,
            Self::DedupReview(c) => c,
            Self::Viewer(c) | Self::Help(c) => c,
        }
    }

    pub fn context_mut(&mut self) -> &mut dyn Context {
        match self {
            Self::Confirm(c) => c,
            Self::CategoryEditor(c) => c,
            Self::CategoryPicker(c) | Self::TagPicker(c) => c,
            Self::Palette(c) => c,
            Self::DedupReview(c) => c,
            Self::Viewer(c) | Self::Help(c) => c,
        }
    }

    pub fn id(&self) -> ContextId {
        self.context().id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_clamps_and_reports_noop_at_edges() {
        let mut cursor = ListCursor::new(3, 2);
        assert_eq!(cursor.navigate(Action::MoveUp), Outcome::NoOp);
        assert_eq!(cursor.navigate(Action::PageDown), Outcome::Handled);
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.navigate(Action::MoveDown), Outcome::NoOp);
        assert_eq!(cursor.navigate(Action::Top), Outcome::Handled);
        assert_eq!(cursor.navigate(Action::Bottom), Outcome::Handled);
        cursor.set_len(1);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn empty_cursor_never_moves() {
        let mut cursor = ListCursor::new(0, 10);
        for action in [Action::MoveDown, Action::Bottom, Action::PageDown] {
            assert_eq!(cursor.navigate(action), Outcome::NoOp);
        }
        assert!(cursor.is_empty());
    }

    #[test]
    fn viewer_without_selection_ignores_select() {
        let mut viewer = ViewerContext::new(Scope::Viewer, "Details", "one\ntwo");
        let mut fx = Effects::new();
        assert_eq!(dispatch(&mut viewer, Action::Select, &mut fx), Outcome::NoOp);
        assert_eq!(dispatch(&mut viewer, Action::Toggle, &mut fx), Outcome::NoOp);
        assert_eq!(dispatch(&mut viewer, Action::Cancel, &mut fx), Outcome::Close);
        assert!(fx.requests().is_empty());
    }
}
