//! Input resolution for the TUI.
//!
//! Responsibilities:
//! - Own the scoped binding registry used to resolve keys into actions.
//! - Render the fallback help text for a scope from that registry.
//!
//! Non-responsibilities:
//! - Mutating application state (contexts do that via capabilities).
//! - Deciding which scope is active (see `app::precedence`).
//!
//! Invariants:
//! - Bindings are the single source of truth for help text and footer keys.

pub mod help;
pub mod keymap;
