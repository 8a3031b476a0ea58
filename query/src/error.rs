//! Query error types.

use nestset_store::StoreError;
use thiserror::Error;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur during query execution.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Malformed row: {message}")]
    Malformed { column: String, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl QueryError {
    pub fn malformed(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            column: column.into(),
            message: message.into(),
        }
    }
}
