//! Configuration management for Tally.
//!
//! This crate provides the settings file and environment loader, the
//! keybinding string parser used for user overrides, and the constants
//! shared across the workspace.

pub mod constants;
pub mod keybind;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path, env_var_or_none};
pub use types::{KeybindAction, KeybindOverrides, MatchModeSetting, Settings};
