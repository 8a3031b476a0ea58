//! Store error types.

use thiserror::Error;

/// Errors raised by a row store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The SQLite driver reported a failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The exclusive table lock could not be acquired in time.
    #[error("timed out waiting for exclusive lock on table {table}")]
    LockTimeout { table: String },

    /// A transaction is already open on this store.
    #[error("a transaction is already active")]
    TransactionActive,

    /// Commit or rollback without an open transaction.
    #[error("no transaction is active")]
    NoTransaction,

    /// Failure reported by a non-SQLite backend.
    #[error("store failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn lock_timeout(table: impl Into<String>) -> Self {
        Self::LockTimeout {
            table: table.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
