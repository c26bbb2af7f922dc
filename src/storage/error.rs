//! Store error types
//!
//! Only table-level conditions are errors. A missing row or a missing column
//! version is a legitimate result (an absent row, a no-op update), never an
//! error.

use thiserror::Error;

/// the main error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// a table with this name is already registered
    #[error("table already exists: {0}")]
    TableAlreadyExists(String),

    /// no table with this name is registered
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// a batch element carries a change kind the engine does not apply
    #[error("unsupported {kind} change at index {index} of table {table}")]
    UnsupportedChange {
        table: String,
        index: usize,
        kind: &'static str,
    },
}

impl StoreError {
    /// check if this error indicates the table doesn't exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::TableNotFound(_))
    }

    /// check if this error is a conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::TableAlreadyExists(_))
    }
}

/// result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
