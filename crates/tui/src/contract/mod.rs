//! Interaction contracts: the declared intents of an active context.
//!
//! Responsibilities:
//! - Provide a base contract per `ContextKind` (list, form, viewer, workflow).
//! - Let concrete contexts declare deviations: relabel, omit, extra hints and
//!   extra required actions.
//!
//! Does NOT handle:
//! - Turning a contract into text (see `footer`).
//! - Resolving keys; contracts name actions and commands, never chords.
//!
//! Invariants:
//! - Contracts are derived, never stored; contexts rebuild them per render.
//! - Every required action must be accepted by the context's handler. The
//!   conformance tests check this for each context.

use std::collections::BTreeSet;

use crate::action::Action;
use crate::input::keymap::Scope;

pub mod footer;

/// Base shape a context starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    List,
    Form,
    Viewer,
    Workflow,
}

/// One hint: an action (or the command a binding carries) and its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub action: Action,
    pub command: Option<&'static str>,
    pub label: &'static str,
    pub omit: bool,
}

impl Intent {
    fn new(action: Action, label: &'static str) -> Self {
        Self {
            action,
            command: None,
            label,
            omit: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionContract {
    pub scope: Scope,
    pub kind: ContextKind,
    intents: Vec<Intent>,
    required: BTreeSet<Action>,
}

impl InteractionContract {
    /// The base contract for `kind`, bound to `scope`.
    pub fn base(kind: ContextKind, scope: Scope) -> Self {
        let (intents, required): (&[(Action, &'static str)], &[Action]) = match kind {
            ContextKind::List => (
                &[
                    (Action::MoveDown, "down"),
                    (Action::MoveUp, "up"),
                    (Action::Select, "select"),
                    (Action::Cancel, "close"),
                ],
                &[Action::MoveDown, Action::MoveUp],
            ),
            ContextKind::Form => (
                &[(Action::Save, "save"), (Action::Cancel, "cancel")],
                &[Action::Save, Action::Cancel],
            ),
            ContextKind::Viewer => (
                &[(Action::MoveDown, "scroll"), (Action::Cancel, "close")],
                &[Action::MoveDown, Action::MoveUp, Action::Cancel],
            ),
            ContextKind::Workflow => (
                &[(Action::Confirm, "confirm"), (Action::Cancel, "cancel")],
                &[Action::Confirm, Action::Cancel],
            ),
        };
        Self {
            scope,
            kind,
            intents: intents
                .iter()
                .map(|&(action, label)| Intent::new(action, label))
                .collect(),
            required: required.iter().copied().collect(),
        }
    }

    /// Change the label of an existing plain intent.
    pub fn relabel(mut self, action: Action, label: &'static str) -> Self {
        for intent in self
            .intents
            .iter_mut()
            .filter(|i| i.action == action && i.command.is_none())
        {
            intent.label = label;
        }
        self
    }

    /// Hide an intent from the footer. It stays declared.
    pub fn omit(mut self, action: Action) -> Self {
        for intent in self.intents.iter_mut().filter(|i| i.action == action) {
            intent.omit = true;
        }
        self
    }

    /// Append a hint for an action.
    pub fn hint(mut self, action: Action, label: &'static str) -> Self {
        self.intents.push(Intent::new(action, label));
        self
    }

    /// Append a hint for the binding that runs `command`.
    pub fn hint_command(mut self, action: Action, command: &'static str, label: &'static str) -> Self {
        self.intents.push(Intent {
            command: Some(command),
            ..Intent::new(action, label)
        });
        self
    }

    /// Add an action the handler must accept.
    pub fn require(mut self, action: Action) -> Self {
        self.required.insert(action);
        self
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Intents shown in the footer, in order.
    pub fn visible(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter().filter(|i| !i.omit)
    }

    pub fn required(&self) -> &BTreeSet<Action> {
        &self.required
    }

    pub fn declares(&self, action: Action) -> bool {
        self.intents.iter().any(|i| i.action == action)
    }
}
