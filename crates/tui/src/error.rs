//! Construction-time failures.
//!
//! Everything here is a broken table (duplicate bindings, duplicate commands,
//! clashing overlay ranks) and aborts startup. Runtime failures never use
//! these types; they become status text.

use thiserror::Error;

use crate::command::CommandError;
use crate::input::keymap::KeymapError;
use crate::overlay::OverlayError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid keymap: {0}")]
    Keymap(#[from] KeymapError),
    #[error("invalid command catalog: {0}")]
    Command(#[from] CommandError),
    #[error("invalid overlay table: {0}")]
    Overlay(#[from] OverlayError),
}
