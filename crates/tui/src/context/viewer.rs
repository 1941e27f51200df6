//! Read-only scrolling text: transaction details, saved filter listings and
//! the help screen.

use tally_config::constants::DEFAULT_PAGE_SIZE;

use crate::action::{Action, ContextId};
use crate::contract::{ContextKind, InteractionContract};
use crate::input::keymap::Scope;

use super::{Confirmable, Context, Effects, ListCursor, Navigable, Outcome};

#[derive(Debug, Clone)]
pub struct ViewerContext {
    id: ContextId,
    scope: Scope,
    title: String,
    lines: Vec<String>,
    scroll: ListCursor,
}

impl ViewerContext {
    pub fn new(scope: Scope, title: impl Into<String>, text: impl AsRef<str>) -> Self {
        let lines: Vec<String> = text.as_ref().lines().map(str::to_owned).collect();
        Self {
            id: ContextId::new(),
            scope,
            title: title.into(),
            scroll: ListCursor::new(lines.len(), DEFAULT_PAGE_SIZE),
            lines,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Index of the first visible line.
    pub fn scroll(&self) -> usize {
        self.scroll.index()
    }
}

impl Navigable for ViewerContext {
    fn navigate(&mut self, action: Action) -> Outcome {
        self.scroll.navigate(action)
    }
}

impl Confirmable for ViewerContext {
    fn confirm(&mut self, _fx: &mut Effects) -> Outcome {
        Outcome::NoOp
    }

    fn cancel(&mut self, _fx: &mut Effects) -> Outcome {
        Outcome::Close
    }
}

impl Context for ViewerContext {
    fn id(&self) -> ContextId {
        self.id
    }

    fn scope(&self) -> Scope {
        self.scope
    }

    fn contract(&self) -> InteractionContract {
        InteractionContract::base(ContextKind::Viewer, self.scope)
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

    #[test]
    fn scroll_stops_at_last_line() {
        let mut viewer = ViewerContext::new(Scope::Help, "Help", "a\nb\nc");
        assert_eq!(viewer.navigate(Action::Bottom), Outcome::Handled);
        assert_eq!(viewer.scroll(), 2);
        assert_eq!(viewer.navigate(Action::MoveDown), Outcome::NoOp);
        assert_eq!(viewer.lines().len(), 3);
    }
}
