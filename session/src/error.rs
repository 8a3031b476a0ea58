//! Session error types.

use thiserror::Error;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Schema error.
    #[error("schema error: {0}")]
    SchemaError(#[from] nestset_schema::SchemaError),

    /// Store error raised outside of a mutation or query.
    #[error("store error: {0}")]
    StoreError(#[from] nestset_store::StoreError),

    /// Query error.
    #[error("query error: {0}")]
    QueryError(#[from] nestset_query::QueryError),

    /// Mutation error.
    #[error("mutation error: {0}")]
    MutationError(#[from] nestset_mutation::MutationError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
