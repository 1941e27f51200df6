//! The boundary between the interaction core and business logic.
//!
//! Storage, suggestions and duplicate detection live behind this trait.
//! The app only ever sees `Invocation`s going out and `Payload`s coming back.

use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::action::{Invocation, Payload};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Rejected(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Executes invocations asynchronously.
///
/// Implementations must be safe to call from several tasks at once; the
/// runtime does not serialize requests.
pub trait Collaborator: Send + Sync {
    fn call(&self, invocation: Invocation) -> BoxFuture<'_, Result<Payload, CollaboratorError>>;
}
