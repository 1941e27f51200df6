//! Bindings for the tab-level list scopes and the transaction filter.

use crossterm::event::KeyCode;

use crate::action::Action;

use super::super::{Binding, KeyChord, Scope};

/// Movement, tab switching, help and quit shared by every tab list.
fn list_navigation(scope: Scope) -> Vec<Binding> {
    vec![
        Binding::new(scope, KeyChord::char('j'), Action::MoveDown, "Next row"),
        Binding::new(scope, KeyChord::plain(KeyCode::Down), Action::MoveDown, "Next row"),
        Binding::new(scope, KeyChord::char('k'), Action::MoveUp, "Previous row"),
        Binding::new(scope, KeyChord::plain(KeyCode::Up), Action::MoveUp, "Previous row"),
        Binding::new(scope, KeyChord::plain(KeyCode::PageDown), Action::PageDown, "Page down"),
        Binding::new(scope, KeyChord::plain(KeyCode::PageUp), Action::PageUp, "Page up"),
        Binding::new(scope, KeyChord::char('g'), Action::Top, "First row"),
        Binding::new(scope, KeyChord::plain(KeyCode::Home), Action::Top, "First row"),
        Binding::new(scope, KeyChord::char('G'), Action::Bottom, "Last row"),
        Binding::new(scope, KeyChord::plain(KeyCode::End), Action::Bottom, "Last row"),
        Binding::new(scope, KeyChord::plain(KeyCode::Tab), Action::NextTab, "Next tab"),
        Binding::new(scope, KeyChord::plain(KeyCode::BackTab), Action::PrevTab, "Previous tab"),
        Binding::new(scope, KeyChord::char('?'), Action::Help, "Show help"),
        Binding::new(scope, KeyChord::char('q'), Action::Quit, "Quit"),
    ]
}

pub(super) fn bindings() -> Vec<Binding> {
    let mut bindings = Vec::new();

    bindings.extend([
        Binding::new(Scope::Transactions, KeyChord::char('/'), Action::Edit, "Filter transactions"),
        Binding::new(
            Scope::Transactions,
            KeyChord::plain(KeyCode::Enter),
            Action::Select,
            "View transaction",
        )
        .with_command("txn.view"),
        Binding::new(Scope::Transactions, KeyChord::char('c'), Action::Edit, "Set category")
            .with_command("txn.categorize"),
        Binding::new(Scope::Transactions, KeyChord::char('t'), Action::Edit, "Edit tags")
            .with_command("txn.tags"),
        Binding::new(Scope::Transactions, KeyChord::char('R'), Action::Delete, "Reset all data")
            .with_command("data.reset"),
    ]);
    bindings.extend(list_navigation(Scope::Transactions));

    bindings.extend([
        Binding::new(
            Scope::TransactionFilter,
            KeyChord::plain(KeyCode::Enter),
            Action::Confirm,
            "Keep filter",
        ),
        Binding::new(
            Scope::TransactionFilter,
            KeyChord::plain(KeyCode::Esc),
            Action::Cancel,
            "Clear filter",
        ),
        Binding::new(
            Scope::TransactionFilter,
            KeyChord::plain(KeyCode::Down),
            Action::MoveDown,
            "Next row",
        ),
        Binding::new(
            Scope::TransactionFilter,
            KeyChord::plain(KeyCode::Up),
            Action::MoveUp,
            "Previous row",
        ),
    ]);

    bindings.extend([
        Binding::new(Scope::Categories, KeyChord::char('n'), Action::Edit, "New category")
            .with_command("cat.new"),
        Binding::new(Scope::Categories, KeyChord::char('r'), Action::Edit, "Rename category")
            .with_command("cat.rename"),
        Binding::new(Scope::Categories, KeyChord::char('x'), Action::Delete, "Delete category")
            .with_command("cat.delete"),
    ]);
    bindings.extend(list_navigation(Scope::Categories));

    bindings.extend([
        Binding::new(Scope::Dedup, KeyChord::char('s'), Action::Apply, "Scan for duplicates")
            .with_command("dedup.scan"),
        Binding::new(
            Scope::Dedup,
            KeyChord::plain(KeyCode::Enter),
            Action::Select,
            "Review group",
        )
        .with_command("dedup.review"),
    ]);
    bindings.extend(list_navigation(Scope::Dedup));

    bindings
}
