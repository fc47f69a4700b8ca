//! Error types for the showcase engine
//!
//! The engine distinguishes four caller-visible failure classes
//! (validation, not-found, permission denial, and constraint conflict) plus
//! opaque store failures. See [`CoreError`] for the taxonomy and
//! [`db::map_db_err`] for how raw database errors are sorted into it.

pub mod core_error;
pub mod db;

pub use core_error::{CoreError, CoreResult};
pub use db::{map_db_err, DbErrorKind};
