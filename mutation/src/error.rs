//! Mutation error types.

use nestset_core::{NodeKey, TreeId};
use nestset_store::StoreError;
use thiserror::Error;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors that can occur during mutation execution.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Table {table} can hold many trees: pass a tree id for column {column}")]
    AmbiguousPartition { table: String, column: String },

    #[error("Table {table} already holds {partition}: a new root needs an empty partition")]
    PartitionOccupied { table: String, partition: String },

    #[error("Node not found: {key}")]
    NotFound { key: NodeKey },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Row {key} has a malformed {column} column")]
    MalformedRow { key: NodeKey, column: String },

    /// Failure raised by the row store, passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MutationError {
    pub fn ambiguous_partition(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::AmbiguousPartition {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn partition_occupied(table: impl Into<String>, tree: Option<TreeId>) -> Self {
        Self::PartitionOccupied {
            table: table.into(),
            partition: match tree {
                Some(tree) => tree.to_string(),
                None => "a tree".to_string(),
            },
        }
    }

    pub fn not_found(key: NodeKey) -> Self {
        Self::NotFound { key }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn malformed_row(key: NodeKey, column: impl Into<String>) -> Self {
        Self::MalformedRow {
            key,
            column: column.into(),
        }
    }
}
