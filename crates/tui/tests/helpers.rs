//! Test helpers for driving the app with key events.

#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tally_config::Settings;
use tally_tui::action::Request;
use tally_tui::model::{Category, DataSnapshot, Transaction};
use tally_tui::runtime::demo::seed;
use tally_tui::{App, Event};

pub fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn enter_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
}

pub fn esc_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)
}

pub fn down_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)
}

pub fn up_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)
}

pub fn tab_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)
}

/// An app with default settings and no data loaded yet.
pub fn empty_app() -> App {
    App::new(&Settings::default()).expect("default tables are valid")
}

/// An app holding the demo seed ledger.
pub fn seeded_app() -> App {
    app_with(seed().expect("seed parses"))
}

pub fn app_with(data: DataSnapshot) -> App {
    let mut app = empty_app();
    app.state.set_data(data);
    app
}

pub fn press(app: &mut App, key: KeyEvent) -> Vec<Request> {
    app.handle_event(Event::Input(key))
}

/// Press each character in turn, collecting every request.
pub fn type_str(app: &mut App, text: &str) -> Vec<Request> {
    text.chars().flat_map(|c| press(app, key(c))).collect()
}

pub fn status_text(app: &App) -> Option<&str> {
    app.state.status.as_ref().map(|s| s.message.as_str())
}

pub fn category(id: u64, name: &str, group: &str) -> Category {
    Category {
        id,
        name: name.into(),
        group: Some(group.into()),
        keywords: Vec::new(),
    }
}

pub fn transaction(id: u64, payee: &str, tags: &[&str]) -> Transaction {
    Transaction {
        id,
        date: "2024-03-01".into(),
        payee: payee.into(),
        amount_cents: -1000,
        category: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        memo: None,
    }
}
