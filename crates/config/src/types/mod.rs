//! Configuration types for Tally.
//!
//! Responsibilities:
//! - Define the persisted `Settings` document and its sub-types.
//! - Define keybinding override identifiers.
//!
//! Does NOT handle:
//! - Reading files or environment variables (see `loader`).
//! - Parsing key strings (see `keybind`).

pub mod keybind;
pub mod settings;

pub use keybind::{KeybindAction, KeybindOverrides};
pub use settings::{MatchModeSetting, Settings};
