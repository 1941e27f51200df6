//! The action vocabulary and the messages exchanged with collaborators.
//!
//! Responsibilities:
//! - Define the closed set of semantic intents (`Action`) that bindings,
//!   contracts and context handlers refer to instead of raw keys.
//! - Define outbound invocations and inbound completions (see `messages`).
//!
//! Does NOT handle:
//! - Resolving keys to actions (see `input::keymap`).
//! - Deciding which context receives an action (see `app`).
//!
//! Invariants:
//! - `Action` carries no payload; the receiving context resolves its target.
//! - `Action::name()` is stable and snake_case; it appears in logs and tests.

use std::fmt;

pub mod messages;

pub use messages::{Completion, ContextId, Invocation, InvocationKind, Payload, Request};

/// A semantic intent, independent of the key that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    // Movement
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    // Selection
    Select,
    Toggle,
    // Editing and resolution
    Edit,
    Confirm,
    Save,
    Cancel,
    Delete,
    Apply,
    // Application-level
    NextTab,
    PrevTab,
    OpenPalette,
    Help,
    Quit,
}

impl Action {
    pub const ALL: [Action; 19] = [
        Self::MoveUp,
        Self::MoveDown,
        Self::PageUp,
        Self::PageDown,
        Self::Top,
        Self::Bottom,
        Self::Select,
        Self::Toggle,
        Self::Edit,
        Self::Confirm,
        Self::Save,
        Self::Cancel,
        Self::Delete,
        Self::Apply,
        Self::NextTab,
        Self::PrevTab,
        Self::OpenPalette,
        Self::Help,
        Self::Quit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::MoveUp => "move_up",
            Self::MoveDown => "move_down",
            Self::PageUp => "page_up",
            Self::PageDown => "page_down",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Select => "select",
            Self::Toggle => "toggle",
            Self::Edit => "edit",
            Self::Confirm => "confirm",
            Self::Save => "save",
            Self::Cancel => "cancel",
            Self::Delete => "delete",
            Self::Apply => "apply",
            Self::NextTab => "next_tab",
            Self::PrevTab => "prev_tab",
            Self::OpenPalette => "open_palette",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }

    /// Default footer label. Contracts may relabel per context.
    pub fn label(self) -> &'static str {
        match self {
            Self::MoveUp => "up",
            Self::MoveDown => "down",
            Self::PageUp => "page up",
            Self::PageDown => "page down",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Select => "select",
            Self::Toggle => "toggle",
            Self::Edit => "edit",
            Self::Confirm => "confirm",
            Self::Save => "save",
            Self::Cancel => "cancel",
            Self::Delete => "delete",
            Self::Apply => "apply",
            Self::NextTab => "next tab",
            Self::PrevTab => "prev tab",
            Self::OpenPalette => "commands",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }

    /// Actions handled by the application shell rather than a context.
    pub fn is_app_level(self) -> bool {
        matches!(
            self,
            Self::NextTab | Self::PrevTab | Self::OpenPalette | Self::Help | Self::Quit
        )
    }

    /// Movement actions, dispatched to `Navigable` contexts.
    pub fn is_motion(self) -> bool {
        matches!(
            self,
            Self::MoveUp | Self::MoveDown | Self::PageUp | Self::PageDown | Self::Top | Self::Bottom
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<tally_config::KeybindAction> for Action {
    fn from(action: tally_config::KeybindAction) -> Self {
        use tally_config::KeybindAction;
        match action {
            KeybindAction::Quit => Self::Quit,
            KeybindAction::Help => Self::Help,
            KeybindAction::OpenPalette => Self::OpenPalette,
            KeybindAction::NextTab => Self::NextTab,
            KeybindAction::PrevTab => Self::PrevTab,
        }
    }
}
