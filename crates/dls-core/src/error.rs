//! Service error taxonomy.
//!
//! Request-time violations (`NotFound`, `InvalidState`) are surfaced to the
//! API layer, which maps them to HTTP status codes. Background-task failures
//! never use this type; they are recorded into the record's `error_message`
//! field instead.

use uuid::Uuid;

/// Errors surfaced by core operations that the API layer maps to responses.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No record exists for the given identifier.
    #[error("download {0} not found")]
    NotFound(Uuid),

    /// The record exists but is not in a state that permits the operation.
    #[error("{0}")]
    InvalidState(String),

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
