//! Footer text for each interaction context.
//!
//! Footers are projected from contracts and the live key registry, so these
//! snapshots change whenever a binding or a contract label changes.

mod helpers;

use std::sync::Arc;

use helpers::*;
use tally_tui::App;
use tally_tui::context::{CategoryEditor, Context, DedupReview, Overlay};
use tally_tui::model::DuplicateGroup;

const WIDE: usize = 200;

fn footer(app: &App) -> String {
    app.footer(WIDE).trim_start().to_string()
}

#[test]
fn snapshot_transactions_footer() {
    let app = seeded_app();
    insta::assert_snapshot!(footer(&app), @"j:down | k:up | /:filter | Enter:view | c:category | t:tags | Tab:next tab | Ctrl+p:commands | ?:help | q:quit");
}

#[test]
fn snapshot_filter_footer() {
    let mut app = seeded_app();
    press(&mut app, key('/'));
    insta::assert_snapshot!(footer(&app), @"Enter:keep filter | Esc:clear | Down:down");
}

#[test]
fn snapshot_categories_footer() {
    let mut app = seeded_app();
    press(&mut app, tab_key());
    insta::assert_snapshot!(footer(&app), @"j:down | k:up | n:new | r:rename | x:delete | Tab:next tab | ?:help");
}

#[test]
fn snapshot_dedup_footer() {
    let mut app = seeded_app();
    press(&mut app, tab_key());
    press(&mut app, tab_key());
    insta::assert_snapshot!(footer(&app), @"j:down | k:up | s:scan | Enter:review | Tab:next tab | ?:help");
}

#[test]
fn snapshot_confirm_footer() {
    let mut app = seeded_app();
    press(&mut app, key('R'));
    insta::assert_snapshot!(footer(&app), @"y:confirm | n:cancel");
}

#[test]
fn snapshot_category_picker_footer() {
    let mut app = seeded_app();
    press(&mut app, key('c'));
    insta::assert_snapshot!(footer(&app), @"Down:down | Up:up | Enter:choose | Esc:cancel");
}

#[test]
fn snapshot_tag_picker_footer() {
    let mut app = seeded_app();
    press(&mut app, key('t'));
    insta::assert_snapshot!(footer(&app), @"Down:down | Up:up | Enter:apply | Esc:cancel | Space:toggle | Ctrl+d:remove");
}

#[test]
fn snapshot_palette_footer() {
    let mut app = seeded_app();
    press(&mut app, ctrl_key('p'));
    insta::assert_snapshot!(footer(&app), @"Down:down | Up:up | Enter:run | Esc:close");
}

#[test]
fn snapshot_editor_footer() {
    let mut app = seeded_app();
    let owner = app.state.categories.id();
    app.state.open(Overlay::CategoryEditor(CategoryEditor::create(owner)));
    insta::assert_snapshot!(footer(&app), @"Enter:save | Esc:cancel");
}

#[test]
fn snapshot_dedup_review_footer() {
    let mut app = seeded_app();
    let review = DedupReview::new(
        app.state.dedup.id(),
        Arc::clone(&app.state.data),
        vec![DuplicateGroup {
            id: 7,
            transactions: vec![7, 8],
        }],
        0,
    );
    app.state.open(Overlay::DedupReview(review));
    insta::assert_snapshot!(footer(&app), @"Enter:merge | Esc:close | d:keep both | j:skip");
}

#[test]
fn narrow_footer_keeps_leading_hints() {
    let app = seeded_app();
    let narrow = app.footer(30);
    assert!(narrow.chars().count() <= 30);
    assert!(narrow.starts_with(" j:down | k:up"));
    assert!(narrow.ends_with("..."));
}
