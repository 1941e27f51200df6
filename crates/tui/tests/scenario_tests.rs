//! End-to-end interaction scenarios driven through `App::handle_event`.
//!
//! ## Invariants
//! - A modal scope swallows keys it does not bind.
//! - Pickers filter with stable section and insertion order.
//! - An unchanged tag selection issues no mutation.

mod helpers;

use helpers::*;
use tally_tui::action::Invocation;
use tally_tui::app::state::Tab;
use tally_tui::command::{Command, CommandRegistry};
use tally_tui::context::{Context, Overlay};
use tally_tui::input::keymap::Scope;
use tally_tui::model::DataSnapshot;

#[test]
fn category_picker_query_keeps_section_order() {
    let mut app = app_with(DataSnapshot {
        transactions: vec![transaction(1, "Market", &[])],
        categories: vec![
            category(1, "Groceries", "Food"),
            category(2, "Dining", "Food"),
            category(3, "Takeout", "Food"),
            category(4, "Cinema", "Leisure"),
            category(5, "Groove Lounge", "Leisure"),
        ],
        ..DataSnapshot::default()
    });

    let requests = press(&mut app, key('c'));
    assert_eq!(
        requests.iter().map(|r| &r.invocation).collect::<Vec<_>>(),
        vec![&Invocation::SuggestCategories { transaction: 1 }]
    );
    assert_eq!(app.active_scope(), Scope::CategoryPicker);

    type_str(&mut app, "gro");
    let Some(Overlay::CategoryPicker(picker)) = &app.state.overlay else {
        panic!("category picker should stay open");
    };
    let labels: Vec<&str> = picker
        .picker()
        .items()
        .iter()
        .map(|item| item.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Groceries", "Groove Lounge"]);
    assert_eq!(picker.picker().source_len(), 5);
}

#[test]
fn toggling_a_tag_on_and_off_issues_nothing() {
    let mut data = DataSnapshot {
        transactions: vec![transaction(7, "Bistro", &["work", "urgent"])],
        tags: vec!["personal".into(), "urgent".into(), "work".into()],
        ..DataSnapshot::default()
    };
    data.categories.push(category(1, "Dining", "Food"));
    let mut app = app_with(data);

    press(&mut app, key('t'));
    assert_eq!(app.active_scope(), Scope::TagPicker);
    let Some(Overlay::TagPicker(picker)) = &app.state.overlay else {
        panic!("tag picker should be open");
    };
    assert_eq!(picker.picker().highlighted().map(|i| i.id.as_str()), Some("personal"));

    press(&mut app, key(' '));
    press(&mut app, key(' '));
    let requests = press(&mut app, enter_key());

    assert!(requests.is_empty());
    assert!(app.state.overlay.is_none());
    assert_eq!(status_text(&app), Some("No tag changes"));
}

#[test]
fn toggled_tag_is_persisted_as_a_patch() {
    let mut app = app_with(DataSnapshot {
        transactions: vec![transaction(7, "Bistro", &["work"])],
        tags: vec!["personal".into(), "work".into()],
        ..DataSnapshot::default()
    });
    press(&mut app, key('t'));
    press(&mut app, key(' '));
    let requests = press(&mut app, enter_key());

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].context, app.state.transactions.id());
    let Invocation::PersistTagPatch { transaction, patch } = &requests[0].invocation else {
        panic!("expected a tag patch, got {:?}", requests[0].invocation);
    };
    assert_eq!(*transaction, 7);
    assert!(patch.added.contains("personal"));
    assert!(patch.removed.is_empty());
}

#[test]
fn palette_search_prefers_prefix_matches() {
    let mut registry: CommandRegistry<(), ()> = CommandRegistry::new();
    for (id, name) in [("cat.new", "New"), ("cat.rename", "Rename"), ("import.csv", "Import")] {
        registry
            .register(Command::new(id, name, "", |_: &mut ()| None))
            .unwrap();
    }
    let ids: Vec<&str> = registry
        .search("cat", Scope::Categories)
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, vec!["cat.new", "cat.rename"]);
}

#[test]
fn confirm_modal_swallows_keys_bound_elsewhere() {
    let mut app = seeded_app();
    press(&mut app, key('R'));
    assert_eq!(app.active_scope(), Scope::Confirm);

    // `t` opens the tag editor on the transactions tab.
    let requests = press(&mut app, key('t'));
    assert!(requests.is_empty());
    assert_eq!(app.active_scope(), Scope::Confirm);
    assert!(matches!(app.state.overlay, Some(Overlay::Confirm(_))));

    // Tab switching is an app-level action and is also held back.
    press(&mut app, tab_key());
    assert_eq!(app.state.tab, Tab::Transactions);

    let requests = press(&mut app, key('y'));
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].invocation, Invocation::ResetData);
    assert!(app.state.overlay.is_none());
}

#[test]
fn palette_runs_commands_and_remembers_them() {
    let mut app = seeded_app();
    press(&mut app, tab_key());
    press(&mut app, ctrl_key('p'));
    assert_eq!(app.active_scope(), Scope::CommandPalette);

    type_str(&mut app, "rename");
    let Some(Overlay::Palette(palette)) = &app.state.overlay else {
        panic!("palette should be open");
    };
    assert_eq!(palette.highlighted().map(|e| e.id.as_str()), Some("cat.rename"));

    press(&mut app, enter_key());
    assert_eq!(app.active_scope(), Scope::CategoryEditor);
    assert_eq!(app.commands().recent().next(), Some("cat.rename"));
}

#[test]
fn hidden_saved_filter_runs_from_the_palette() {
    let mut app = seeded_app();
    press(&mut app, ctrl_key('p'));
    type_str(&mut app, "filter.apply.2");
    let Some(Overlay::Palette(palette)) = &app.state.overlay else {
        panic!("palette should be open");
    };
    assert!(palette.entries().iter().all(|e| !e.id.starts_with("filter.apply.")));

    let requests = press(&mut app, enter_key());
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].invocation, Invocation::ApplySavedFilter { filter: 2 });
    assert_eq!(app.state.transactions.filter().value(), "work");
    assert!(app.state.transactions.rows().all(|t| t.tags.iter().any(|tag| tag == "work")));
}

#[test]
fn filter_field_claims_printable_keys() {
    let mut app = seeded_app();
    press(&mut app, key('/'));
    assert_eq!(app.active_scope(), Scope::TransactionFilter);

    // `q` quits on the list but is text while filtering.
    type_str(&mut app, "fresh q");
    assert!(!app.should_quit());
    assert_eq!(app.state.transactions.filter().value(), "fresh q");
    assert_eq!(app.state.transactions.row_count(), 0);

    press(&mut app, esc_key());
    assert_eq!(app.active_scope(), Scope::Transactions);
    assert!(app.state.transactions.filter().is_empty());
    assert_eq!(app.state.transactions.row_count(), 14);
}

#[test]
fn dedup_review_merges_under_the_list_id() {
    let mut app = seeded_app();
    press(&mut app, tab_key());
    press(&mut app, tab_key());
    assert_eq!(app.active_scope(), Scope::Dedup);

    let requests = press(&mut app, key('s'));
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].invocation, Invocation::RunDedupScan);
    assert!(app.state.dedup.is_scanning());

    // Review is disabled until a scan returns groups.
    press(&mut app, enter_key());
    assert!(app.state.overlay.is_none());
    assert_eq!(status_text(&app), Some("No duplicate groups; run a scan first"));
}
