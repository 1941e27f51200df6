//! Runtime pieces wired together by `main`.
//!
//! - `collaborator`: the async boundary to storage and analysis.
//! - `demo`: an in-memory collaborator over seed data.
//! - `tasks`: spawning requests and posting completions.
//! - `terminal`: raw mode and alternate screen handling.
//!
//! Does NOT handle:
//! - Input resolution or state changes (see `app`).

pub mod collaborator;
pub mod demo;
pub mod tasks;
pub mod terminal;

pub use collaborator::{Collaborator, CollaboratorError};
pub use demo::DemoCollaborator;
