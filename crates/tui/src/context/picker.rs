//! Category and tag pickers over a transaction.
//!
//! Responsibilities:
//! - Build `PickerItem`s from the snapshot for the picker's purpose.
//! - Translate picker results into collaborator requests.
//! - Merge asynchronous category suggestions into the open picker.
//!
//! Does NOT handle:
//! - Filtering, ranking or patch computation (see `crate::picker`).
//!
//! Invariants:
//! - Mutations are issued under the owner's id; suggestion requests under
//!   the picker's own id, so late suggestions die with the picker.
//! - An empty tag patch issues no request.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};

use crate::action::{Action, ContextId, Invocation, Request};
use crate::contract::{ContextKind, InteractionContract};
use crate::input::keymap::Scope;
use crate::model::{CategoryId, DataSnapshot, TransactionId};
use crate::picker::{
    Mark, MatchMode, Picker, PickerItem, PickerResult, Selection, SelectionMode,
};
use crate::status::Status;
use crate::text_field::TextField;

use super::{Confirmable, Context, Editable, Effects, Navigable, Outcome, Selectable};

const SUGGESTED_SECTION: &str = "Suggested";
const UNGROUPED_SECTION: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPurpose {
    Category { transaction: TransactionId },
    Tags { transaction: TransactionId },
}

impl PickerPurpose {
    pub fn transaction(self) -> TransactionId {
        match self {
            Self::Category { transaction } | Self::Tags { transaction } => transaction,
        }
    }
}

/// Progress of the category suggestion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionState {
    NotRequested,
    Pending,
    Ready(usize),
    Failed,
}

#[derive(Debug, Clone)]
pub struct PickerContext {
    id: ContextId,
    owner: ContextId,
    purpose: PickerPurpose,
    data: Arc<DataSnapshot>,
    picker: Picker,
    suggestions: SuggestionState,
}

fn category_items(data: &DataSnapshot, suggested: &[CategoryId]) -> Vec<PickerItem> {
    let item = |id: CategoryId, section: &str| {
        data.category(id).map(|c| {
            let mut item = PickerItem::new(c.id.to_string(), c.name.clone()).section(section);
            if !c.keywords.is_empty() {
                item = item.meta(c.keywords.join(", "));
            }
            item
        })
    };
    let mut items: Vec<PickerItem> = suggested
        .iter()
        .filter_map(|&id| item(id, SUGGESTED_SECTION))
        .collect();
    items.extend(
        data.categories
            .iter()
            .filter(|c| !suggested.contains(&c.id))
            .filter_map(|c| item(c.id, c.group.as_deref().unwrap_or(UNGROUPED_SECTION))),
    );
    items
}

fn tag_items(data: &DataSnapshot, transaction: TransactionId) -> Vec<PickerItem> {
    let current: &[String] = data
        .transaction(transaction)
        .map(|t| t.tags.as_slice())
        .unwrap_or_default();
    let mut names: Vec<&str> = data.tags.iter().map(String::as_str).collect();
    for tag in current {
        if !names.contains(&tag.as_str()) {
            names.push(tag);
        }
    }
    names
        .into_iter()
        .map(|name| {
            let mark = if current.iter().any(|t| t == name) {
                Mark::On
            } else {
                Mark::Off
            };
            PickerItem::new(name, name).mark(mark)
        })
        .collect()
}

impl PickerContext {
    pub fn categories(
        owner: ContextId,
        data: Arc<DataSnapshot>,
        transaction: TransactionId,
        match_mode: MatchMode,
    ) -> Self {
        let picker = Picker::new(category_items(&data, &[]), SelectionMode::Single)
            .with_match_mode(match_mode)
            .with_create(true);
        Self {
            id: ContextId::new(),
            owner,
            purpose: PickerPurpose::Category { transaction },
            data,
            picker,
            suggestions: SuggestionState::NotRequested,
        }
    }

    pub fn tags(
        owner: ContextId,
        data: Arc<DataSnapshot>,
        transaction: TransactionId,
        match_mode: MatchMode,
    ) -> Self {
        let picker = Picker::new(tag_items(&data, transaction), SelectionMode::TriState)
            .with_match_mode(match_mode);
        Self {
            id: ContextId::new(),
            owner,
            purpose: PickerPurpose::Tags { transaction },
            data,
            picker,
            suggestions: SuggestionState::NotRequested,
        }
    }

    pub fn purpose(&self) -> PickerPurpose {
        self.purpose
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn suggestions(&self) -> SuggestionState {
        self.suggestions
    }

    pub fn title(&self) -> String {
        let payee = self
            .data
            .transaction(self.purpose.transaction())
            .map(|t| t.payee.as_str())
            .unwrap_or("transaction");
        match self.purpose {
            PickerPurpose::Category { .. } => format!("Category for {payee}"),
            PickerPurpose::Tags { .. } => format!("Tags for {payee}"),
        }
    }

    /// The suggestion request for a category picker, addressed to this picker.
    pub fn request_suggestions(&mut self) -> Option<Request> {
        let PickerPurpose::Category { transaction } = self.purpose else {
            return None;
        };
        self.suggestions = SuggestionState::Pending;
        Some(Request::new(self.id, Invocation::SuggestCategories { transaction }))
    }

    /// Move suggested categories into a leading section.
    pub fn apply_suggestions(&mut self, suggested: &[CategoryId]) {
        if !matches!(self.purpose, PickerPurpose::Category { .. }) {
            return;
        }
        let known: Vec<CategoryId> = suggested
            .iter()
            .copied()
            .filter(|&id| self.data.category(id).is_some())
            .collect();
        self.suggestions = SuggestionState::Ready(known.len());
        self.picker.replace_items(category_items(&self.data, &known));
    }

    pub fn suggestions_failed(&mut self) {
        self.suggestions = SuggestionState::Failed;
    }

    fn finish(&mut self, result: PickerResult, fx: &mut Effects) -> Outcome {
        match result {
            PickerResult::NoOp => Outcome::NoOp,
            PickerResult::Moved | PickerResult::FilterChanged | PickerResult::Toggled(_) => {
                Outcome::Handled
            }
            PickerResult::Cancelled => Outcome::Close,
            PickerResult::Created(name) => {
                fx.request(self.owner, Invocation::CreateCategory { name });
                Outcome::Close
            }
            PickerResult::Selected(Selection::Item(item)) => {
                let PickerPurpose::Category { transaction } = self.purpose else {
                    return Outcome::NoOp;
                };
                let Ok(category) = item.id.parse::<CategoryId>() else {
                    tracing::warn!(id = %item.id, "Picker item id is not a category id");
                    return Outcome::NoOp;
                };
                fx.request(self.owner, Invocation::SetCategory { transaction, category });
                Outcome::Close
            }
            PickerResult::Selected(Selection::Patch(patch)) => {
                if patch.is_empty() {
                    fx.status(Status::info("No tag changes"));
                } else {
                    fx.request(
                        self.owner,
                        Invocation::PersistTagPatch {
                            transaction: self.purpose.transaction(),
                            patch,
                        },
                    );
                }
                Outcome::Close
            }
        }
    }
}

impl Navigable for PickerContext {
    fn navigate(&mut self, action: Action) -> Outcome {
        let result = self.picker.handle_action(action);
        self.finish(result, &mut Effects::new())
    }
}

impl Selectable for PickerContext {
    fn select(&mut self, fx: &mut Effects) -> Outcome {
        let result = self.picker.handle_action(Action::Select);
        self.finish(result, fx)
    }

    fn toggle(&mut self) -> Outcome {
        let result = self.picker.handle_action(Action::Toggle);
        self.finish(result, &mut Effects::new())
    }

    fn clear_mark(&mut self) -> Outcome {
        let result = self.picker.handle_action(Action::Delete);
        self.finish(result, &mut Effects::new())
    }
}

impl Editable for PickerContext {
    fn field(&self) -> Option<&TextField> {
        Some(self.picker.query_field())
    }

    fn claims(&self, key: KeyEvent) -> bool {
        // Space toggles in mark-carrying pickers.
        if key.code == KeyCode::Char(' ') && self.picker.mode() != SelectionMode::Single {
            return false;
        }
        self.picker.query_field().claims(key)
    }

    fn edit(&mut self, key: KeyEvent) -> Outcome {
        let result = self.picker.edit_query(key);
        self.finish(result, &mut Effects::new())
    }
}

impl Confirmable for PickerContext {
    fn confirm(&mut self, fx: &mut Effects) -> Outcome {
        self.select(fx)
    }

    fn cancel(&mut self, fx: &mut Effects) -> Outcome {
        let result = self.picker.handle_action(Action::Cancel);
        self.finish(result, fx)
    }
}

impl Context for PickerContext {
    fn id(&self) -> ContextId {
        self.id
    }

    fn scope(&self) -> Scope {
        match self.purpose {
            PickerPurpose::Category { .. } => Scope::CategoryPicker,
            PickerPurpose::Tags { .. } => Scope::TagPicker,
        }
    }

    fn contract(&self) -> InteractionContract {
        let base = InteractionContract::base(ContextKind::List, self.scope())
            .relabel(Action::Cancel, "cancel")
            .require(Action::Select)
            .require(Action::Cancel);
        match self.purpose {
            PickerPurpose::Category { .. } => base.relabel(Action::Select, "choose"),
            PickerPurpose::Tags { .. } => base
                .relabel(Action::Select, "apply")
                .hint(Action::Toggle, "toggle")
                .hint(Action::Delete, "remove")
                .require(Action::Toggle)
                .require(Action::Delete),
        }
    }

    fn navigable(&mut self) -> Option<&mut dyn Navigable> {
        Some(self)
    }

    fn selectable(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
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
