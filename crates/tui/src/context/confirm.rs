//! Yes/no confirmation guarding a destructive request.

use crate::action::{ContextId, Request};
use crate::contract::{ContextKind, InteractionContract};
use crate::input::keymap::Scope;

use super::{Confirmable, Context, Effects, Outcome};

#[derive(Debug, Clone)]
pub struct ConfirmContext {
    id: ContextId,
    title: String,
    message: String,
    request: Request,
}

impl ConfirmContext {
    /// `request` is issued as-is on confirm; it carries its owner's id.
    pub fn new(title: impl Into<String>, message: impl Into<String>, request: Request) -> Self {
        Self {
            id: ContextId::new(),
            title: title.into(),
            message: message.into(),
            request,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn request(&self) -> &Request {
        &self.request
    }
}

impl Confirmable for ConfirmContext {
    fn confirm(&mut self, fx: &mut Effects) -> Outcome {
        fx.push(self.request.clone());
        Outcome::Close
    }

    fn cancel(&mut self, _fx: &mut Effects) -> Outcome {
        Outcome::Close
    }
}

impl Context for ConfirmContext {
    fn id(&self) -> ContextId {
        self.id
    }

    fn scope(&self) -> Scope {
        Scope::Confirm
    }

    fn contract(&self) -> InteractionContract {
        InteractionContract::base(ContextKind::Workflow, Scope::Confirm)
    }

    fn confirmable(&mut self) -> Option<&mut dyn Confirmable> {
        Some(self)
    }
}
