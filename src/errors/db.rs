//! Database error categorization
//!
//! SeaORM surfaces constraint violations as stringly `Exec`/`Query` errors.
//! This module sorts them into the categories the engine cares about so a
//! duplicate-key insert becomes a `Conflict` and a dangling reference a
//! `Validation`, while everything else stays an opaque store failure.

use sea_orm::DbErr;

use super::core_error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    /// Query returned no results
    NotFound,
    /// Unique constraint violation (duplicate pair)
    UniqueViolation,
    /// Foreign key constraint violation (invalid reference)
    ForeignKeyViolation,
    /// Database connection failed
    ConnectionError,
    /// Query timeout
    Timeout,
    /// Unknown/other database error
    Unknown,
}

impl DbErrorKind {
    /// Categorize a sea_orm database error
    pub fn from_db_err(err: &DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(_) => Self::NotFound,
            DbErr::Conn(e) if e.to_string().to_lowercase().contains("timeout") => Self::Timeout,
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::ConnectionError,
            DbErr::Exec(e) | DbErr::Query(e) => {
                let msg = e.to_string().to_lowercase();
                if msg.contains("unique") || msg.contains("duplicate") {
                    Self::UniqueViolation
                } else if msg.contains("foreign key") || msg.contains("fk_") {
                    Self::ForeignKeyViolation
                } else if msg.contains("timeout") {
                    Self::Timeout
                } else {
                    Self::Unknown
                }
            }
            _ => Self::Unknown,
        }
    }

    /// Transient errors that a caller (not the engine) might retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectionError | Self::Timeout)
    }
}

/// Map a `DbErr` raised during `operation` to the engine error taxonomy.
///
/// Unique violations become `Conflict` naming the operation, foreign key
/// violations become `Validation`, and everything else is an opaque `Store`
/// failure.
pub fn map_db_err(operation: &str, err: DbErr) -> CoreError {
    match DbErrorKind::from_db_err(&err) {
        DbErrorKind::UniqueViolation => {
            CoreError::conflict(format!("{}: duplicate key violation ({})", operation, err))
        }
        DbErrorKind::ForeignKeyViolation => CoreError::validation(format!(
            "{}: referenced row does not exist ({})",
            operation, err
        )),
        _ => CoreError::Store(err),
    }
}
