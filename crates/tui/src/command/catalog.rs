//! The application's command catalog.
//!
//! Commands run against `AppState` on the event loop. Those that need a
//! collaborator return the `Request` to dispatch; the rest only change
//! state (open an overlay, switch tabs).

use std::fmt::Write as _;

use crate::action::{Invocation, Request};
use crate::app::state::{AppState, Tab};
use crate::context::{
    CategoryEditor, ConfirmContext, Context, DedupReview, Overlay, PickerContext, ViewerContext,
};
use crate::input::keymap::Scope;
use crate::model::{FilterId, Transaction};
use crate::status::Status;

use super::{Availability, Command, CommandError, CommandRegistry};

pub type AppCommand = Command<AppState, Request>;
pub type AppCommands = CommandRegistry<AppState, Request>;

/// Prefix of the generated per-filter commands, e.g. `filter.apply.3`.
pub const SAVED_FILTER_PREFIX: &str = "filter.apply.";

fn needs_transaction(state: &AppState) -> Availability {
    if state.transactions.selected().is_some() {
        Availability::Enabled
    } else {
        Availability::disabled("No transaction selected")
    }
}

fn needs_category(state: &AppState) -> Availability {
    if state.categories.selected().is_some() {
        Availability::Enabled
    } else {
        Availability::disabled("No category selected")
    }
}

fn needs_data(state: &AppState) -> Availability {
    if state.loading {
        Availability::disabled("Data is still loading")
    } else {
        Availability::Enabled
    }
}

fn transaction_details(state: &AppState, txn: &Transaction) -> String {
    let data = &state.data;
    let mut text = String::new();
    let _ = writeln!(text, "Date:      {}", txn.date);
    let _ = writeln!(text, "Payee:     {}", txn.payee);
    let _ = writeln!(text, "Amount:    {}", txn.amount_display());
    let _ = writeln!(text, "Category:  {}", data.category_name(txn.category));
    let tags = if txn.tags.is_empty() {
        "none".to_string()
    } else {
        txn.tags.join(", ")
    };
    let _ = writeln!(text, "Tags:      {tags}");
    if let Some(memo) = &txn.memo {
        let _ = writeln!(text, "Memo:      {memo}");
    }
    text
}

fn saved_filter_listing(state: &AppState) -> String {
    let mut text = String::new();
    for filter in &state.data.saved_filters {
        let _ = writeln!(
            text,
            "{SAVED_FILTER_PREFIX}{:<4} {}  ({})",
            filter.id, filter.name, filter.query
        );
    }
    text.push_str("\nRun a filter by typing its id into the command palette.\n");
    text
}

fn transaction_commands() -> Vec<AppCommand> {
    vec![
        Command::new(
            "txn.view",
            "View transaction",
            "Show details for the selected transaction",
            |state: &mut AppState| {
                let txn = state.transactions.selected()?.clone();
                let text = transaction_details(state, &txn);
                state.open(Overlay::Viewer(ViewerContext::new(Scope::Viewer, txn.payee, text)));
                None
            },
        )
        .scopes([Scope::Transactions])
        .enabled_when(needs_transaction),
        Command::new(
            "txn.categorize",
            "Set category",
            "Choose a category for the selected transaction",
            |state: &mut AppState| {
                let transaction = state.transactions.selected_id()?;
                let mut picker = PickerContext::categories(
                    state.transactions.id(),
                    state.data.clone(),
                    transaction,
                    state.match_mode,
                );
                let request = picker.request_suggestions();
                state.open(Overlay::CategoryPicker(picker));
                request
            },
        )
        .scopes([Scope::Transactions])
        .enabled_when(needs_transaction),
        Command::new(
            "txn.tags",
            "Edit tags",
            "Add or remove tags on the selected transaction",
            |state: &mut AppState| {
                let transaction = state.transactions.selected_id()?;
                let picker = PickerContext::tags(
                    state.transactions.id(),
                    state.data.clone(),
                    transaction,
                    state.match_mode,
                );
                state.open(Overlay::TagPicker(picker));
                None
            },
        )
        .scopes([Scope::Transactions])
        .enabled_when(needs_transaction),
        Command::new(
            "filter.clear",
            "Clear filter",
            "Show every transaction",
            |state: &mut AppState| {
                state.transactions.clear_filter();
                None
            },
        )
        .scopes([Scope::Transactions])
        .enabled_when(|state: &AppState| {
            if state.transactions.filter().is_empty() {
                Availability::disabled("No filter is set")
            } else {
                Availability::Enabled
            }
        }),
        Command::new(
            "filter.list",
            "Saved filters",
            "List saved filters and the ids that apply them",
            |state: &mut AppState| {
                let text = saved_filter_listing(state);
                state.open(Overlay::Viewer(ViewerContext::new(
                    Scope::Viewer,
                    "Saved filters",
                    text,
                )));
                None
            },
        )
        .enabled_when(|state: &AppState| {
            if state.data.saved_filters.is_empty() {
                Availability::disabled("No saved filters")
            } else {
                Availability::Enabled
            }
        }),
    ]
}

fn category_commands() -> Vec<AppCommand> {
    vec![
        Command::new(
            "cat.new",
            "New category",
            "Create a category",
            |state: &mut AppState| {
                let owner = state.categories.id();
                state.open(Overlay::CategoryEditor(CategoryEditor::create(owner)));
                None
            },
        )
        .enabled_when(needs_data),
        Command::new(
            "cat.rename",
            "Rename category",
            "Rename the selected category",
            |state: &mut AppState| {
                let category = state.categories.selected()?;
                let editor = CategoryEditor::rename(state.categories.id(), category.id, &category.name);
                state.open(Overlay::CategoryEditor(editor));
                None
            },
        )
        .scopes([Scope::Categories])
        .enabled_when(needs_category),
        Command::new(
            "cat.delete",
            "Delete category",
            "Delete the selected category after confirmation",
            |state: &mut AppState| {
                let category = state.categories.selected()?;
                let message = format!(
                    "Delete '{}'? Its transactions become uncategorized.",
                    category.name
                );
                let request = Request::new(
                    state.categories.id(),
                    Invocation::DeleteCategory {
                        category: category.id,
                    },
                );
                state.open(Overlay::Confirm(ConfirmContext::new(
                    "Delete category",
                    message,
                    request,
                )));
                None
            },
        )
        .scopes([Scope::Categories])
        .enabled_when(needs_category),
    ]
}

fn dedup_commands() -> Vec<AppCommand> {
    vec![
        Command::new(
            "dedup.scan",
            "Scan for duplicates",
            "Look for transactions recorded more than once",
            |state: &mut AppState| {
                state.dedup.begin_scan();
                state.set_status(Status::info("Scanning for duplicates..."));
                Some(Request::new(state.dedup.id(), Invocation::RunDedupScan))
            },
        )
        .enabled_when(|state: &AppState| {
            if state.dedup.is_scanning() {
                Availability::disabled("A scan is already running")
            } else {
                needs_data(state)
            }
        }),
        Command::new(
            "dedup.review",
            "Review duplicates",
            "Step through duplicate groups from the selected one",
            |state: &mut AppState| {
                let start = state.dedup.selected_index()?;
                let review = DedupReview::new(
                    state.dedup.id(),
                    state.data.clone(),
                    state.dedup.groups().to_vec(),
                    start,
                );
                state.open(Overlay::DedupReview(review));
                None
            },
        )
        .scopes([Scope::Dedup])
        .enabled_when(|state: &AppState| {
            if state.dedup.groups().is_empty() {
                Availability::disabled("No duplicate groups; run a scan first")
            } else {
                Availability::Enabled
            }
        }),
    ]
}

fn data_commands() -> Vec<AppCommand> {
    vec![
        Command::new(
            "data.reload",
            "Reload data",
            "Fetch a fresh snapshot",
            |state: &mut AppState| {
                state.loading = true;
                Some(Request::new(state.transactions.id(), Invocation::LoadSnapshot))
            },
        ),
        Command::new(
            "data.reset",
            "Reset all data",
            "Discard every change and restore the initial data",
            |state: &mut AppState| {
                let request = Request::new(state.transactions.id(), Invocation::ResetData);
                state.open(Overlay::Confirm(ConfirmContext::new(
                    "Reset all data",
                    "This discards every change made since the data was created. Continue?",
                    request,
                )));
                None
            },
        )
        .enabled_when(needs_data),
    ]
}

fn navigation_commands() -> Vec<AppCommand> {
    let tab = |id: &'static str, target: Tab| {
        Command::new(
            id,
            format!("Go to {}", target.title()),
            format!("Switch to the {} tab", target.title().to_lowercase()),
            move |state: &mut AppState| {
                state.tab = target;
                None
            },
        )
    };
    vec![
        tab("tab.transactions", Tab::Transactions),
        tab("tab.categories", Tab::Categories),
        tab("tab.dedup", Tab::Dedup),
        Command::new("app.quit", "Quit", "Exit the application", |state: &mut AppState| {
            state.quit = true;
            None
        }),
    ]
}

/// `filter.apply.<id>`: apply one saved filter to the transaction list.
fn saved_filter_command(suffix: &str, state: &AppState) -> Option<AppCommand> {
    let id: FilterId = suffix.parse().ok()?;
    let filter = state.data.saved_filter(id)?;
    let query = filter.query.clone();
    Some(Command::new(
        format!("{SAVED_FILTER_PREFIX}{id}"),
        format!("Apply filter: {}", filter.name),
        format!("Filter transactions by '{query}'"),
        move |state: &mut AppState| {
            state.tab = Tab::Transactions;
            state.transactions.set_filter(&query);
            Some(Request::new(
                state.transactions.id(),
                Invocation::ApplySavedFilter { filter: id },
            ))
        },
    ))
}

/// Build the full catalog. Fails only on duplicate ids.
pub fn registry() -> Result<AppCommands, CommandError> {
    let mut registry = CommandRegistry::new();
    for command in transaction_commands()
        .into_iter()
        .chain(category_commands())
        .chain(dedup_commands())
        .chain(data_commands())
        .chain(navigation_commands())
    {
        registry.register(command)?;
    }
    registry.register_generator(SAVED_FILTER_PREFIX, saved_filter_command);
    Ok(registry)
}
