//! Engine-wide error type
//!
//! Every service operation returns `CoreResult<T>`. The variants keep the
//! four caller-visible outcomes distinct: bad payload, missing resource,
//! denied action, and constraint conflict. `Store` wraps any failure of the
//! database itself and is the only variant that aborts an in-flight
//! composite write.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Payload failed structural or field checks; nothing was written.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A referenced row does not exist. Distinct from `Forbidden` so a
    /// caller can tell "doesn't exist" from "exists but you can't touch it".
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// The authorization resolver denied the action.
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// A unique constraint was violated; the message names the conflicting
    /// pair. The engine never auto-dedupes silently at this level.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The durable store failed (connection, disk, aborted transaction).
    /// Surfaced opaque; never retried inside the engine.
    #[error("Database error: {0}")]
    Store(#[from] sea_orm::DbErr),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: i32) -> Self {
        CoreError::NotFound { entity, id }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        CoreError::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        CoreError::Conflict(message.into())
    }

    /// Check if this is a client error (400-series when mapped to HTTP)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::Validation(_)
                | CoreError::NotFound { .. }
                | CoreError::Forbidden(_)
                | CoreError::Conflict(_)
        )
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
