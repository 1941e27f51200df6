//! Settings loader for environment variables and the settings file.
//!
//! Responsibilities:
//! - Resolve the settings file path (explicit > `TALLY_CONFIG_PATH` > platform default).
//! - Read `config.json`, then apply environment variable overrides.
//! - Gate `.env` loading behind an explicit `load_dotenv()` call.
//!
//! Does NOT handle:
//! - Writing settings back to disk.
//! - Applying keybinding overrides to the keymap (see the TUI crate).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over file values.
//! - A missing settings file yields defaults; an unreadable or invalid one is an error.
//! - `TALLY_DOTENV_DISABLED` is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod error;
mod path;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
pub use path::default_config_path;
