//! Tally TUI library.
//!
//! The interaction core of a keyboard-driven transaction categorizer:
//! scoped key bindings, an overlay precedence table, capability-based
//! contexts with interaction contracts, a reusable picker, and a command
//! registry. Business logic sits behind `runtime::Collaborator`.
//!
//! # Example
//!
//! ```rust
//! use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
//! use tally_config::Settings;
//! use tally_tui::{App, Event};
//!
//! let mut app = App::new(&Settings::default()).unwrap();
//! app.handle_event(Event::Input(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
//! assert!(app.should_quit());
//! ```

pub mod action;
pub mod app;
pub mod cli;
pub mod command;
pub mod context;
pub mod contract;
pub mod error;
pub mod event;
pub mod input;
pub mod model;
pub mod overlay;
pub mod picker;
pub mod runtime;
pub mod status;
pub mod text_field;
pub mod ui;

pub use action::Action;
pub use app::App;
pub use event::Event;
