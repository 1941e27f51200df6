//! Single-field form for creating or renaming a category.

use crossterm::event::KeyEvent;

use crate::action::{ContextId, Invocation};
use crate::contract::{ContextKind, InteractionContract};
use crate::input::keymap::Scope;
use crate::model::CategoryId;
use crate::status::Status;
use crate::text_field::{FieldFlags, TextEdit, TextField};

use super::{Confirmable, Context, Editable, Effects, Outcome};

#[derive(Debug, Clone)]
pub struct CategoryEditor {
    id: ContextId,
    owner: ContextId,
    /// `None` creates a new category.
    target: Option<CategoryId>,
    original: String,
    name: TextField,
}

impl CategoryEditor {
    fn with(owner: ContextId, target: Option<CategoryId>, original: &str) -> Self {
        Self {
            id: ContextId::new(),
            owner,
            target,
            original: original.to_string(),
            name: TextField::with_value(
                original,
                FieldFlags::CURSOR_AWARE | FieldFlags::PRINTABLE_FIRST | FieldFlags::VIM_NAV_SUPPRESSED,
            ),
        }
    }

    pub fn create(owner: ContextId) -> Self {
        Self::with(owner, None, "")
    }

    pub fn rename(owner: ContextId, category: CategoryId, current: &str) -> Self {
        Self::with(owner, Some(category), current)
    }

    pub fn title(&self) -> &'static str {
        match self.target {
            Some(_) => "Rename category",
            None => "New category",
        }
    }

    pub fn target(&self) -> Option<CategoryId> {
        self.target
    }

    pub fn name(&self) -> &TextField {
        &self.name
    }
}

impl Editable for CategoryEditor {
    fn field(&self) -> Option<&TextField> {
        Some(&self.name)
    }

    fn edit(&mut self, key: KeyEvent) -> Outcome {
        match self.name.handle_key(key) {
            TextEdit::Ignored => Outcome::NoOp,
            _ => Outcome::Handled,
        }
    }

    fn save(&mut self, fx: &mut Effects) -> Outcome {
        let name = self.name.value().trim();
        if name.is_empty() {
            fx.status(Status::error("Category name cannot be empty"));
            return Outcome::Handled;
        }
        match self.target {
            Some(_) if name == self.original => {
                fx.status(Status::info("Name unchanged"));
            }
            Some(category) => fx.request(
                self.owner,
                Invocation::RenameCategory {
                    category,
                    name: name.to_string(),
                },
            ),
            None => fx.request(
                self.owner,
                Invocation::CreateCategory {
                    name: name.to_string(),
                },
            ),
        }
        Outcome::Close
    }
}

impl Confirmable for CategoryEditor {
    fn confirm(&mut self, fx: &mut Effects) -> Outcome {
        self.save(fx)
    }

    fn cancel(&mut self, _fx: &mut Effects) -> Outcome {
        Outcome::Close
    }
}

impl Context for CategoryEditor {
    fn id(&self) -> ContextId {
        self.id
    }

    fn scope(&self) -> Scope {
        Scope::CategoryEditor
    }

    fn contract(&self) -> InteractionContract {
        InteractionContract::base(ContextKind::Form, Scope::CategoryEditor)
    }

    fn editable(&self) -> Option<&dyn Editable> {
        Some(self)
    }

    fn editable_mut(&mut self) -> Option<&mut dyn Editable> {
        Some(self)
    }

    fn confirmable(&mut self) -> Option<&mut dyn Confirmable> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::context::{dispatch, edit_key};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn empty_name_stays_open_with_error() {
        let mut editor = CategoryEditor::create(ContextId::new());
        let mut fx = Effects::new();
        assert_eq!(dispatch(&mut editor, Action::Save, &mut fx), Outcome::Handled);
        assert!(fx.requests().is_empty());
        assert_eq!(
            fx.status_message().map(|s| s.message.as_str()),
            Some("Category name cannot be empty")
        );
    }

    #[test]
    fn typed_name_is_created_under_owner() {
        let owner = ContextId::new();
        let mut editor = CategoryEditor::create(owner);
        for c in "Pets".chars() {
            assert_eq!(edit_key(&mut editor, key(KeyCode::Char(c))), Some(Outcome::Handled));
        }
        // Enter is not a field key; it resolves to Save through the scope.
        assert_eq!(edit_key(&mut editor, key(KeyCode::Enter)), None);

        let mut fx = Effects::new();
        assert_eq!(dispatch(&mut editor, Action::Save, &mut fx), Outcome::Close);
        assert_eq!(
            fx.requests()[0].invocation,
            Invocation::CreateCategory { name: "Pets".into() }
        );
        assert_eq!(fx.requests()[0].context, owner);
    }

    #[test]
    fn rename_edits_in_place() {
        let mut editor = CategoryEditor::rename(ContextId::new(), 4, "Fuel");
        edit_key(&mut editor, key(KeyCode::Home));
        for c in "Car ".chars() {
            edit_key(&mut editor, key(KeyCode::Char(c)));
        }
        let mut fx = Effects::new();
        assert_eq!(dispatch(&mut editor, Action::Save, &mut fx), Outcome::Close);
        assert_eq!(
            fx.requests()[0].invocation,
            Invocation::RenameCategory {
                category: 4,
                name: "Car Fuel".into()
            }
        );
    }

    #[test]
    fn unchanged_rename_issues_nothing() {
        let mut editor = CategoryEditor::rename(ContextId::new(), 4, "Fuel");
        let mut fx = Effects::new();
        assert_eq!(dispatch(&mut editor, Action::Save, &mut fx), Outcome::Close);
        assert!(fx.requests().is_empty());
    }
}
