//! Schema error types.

use thiserror::Error;

/// Errors that can occur while building or loading a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Invalid identifier for {role}: {name:?}")]
    InvalidIdentifier { role: String, name: String },

    #[error("Column {name} is used for both {first} and {second}")]
    DuplicateColumn {
        name: String,
        first: String,
        second: String,
    },

    #[error("Invalid root parent mode: {0:?} (expected \"zero\" or \"null\")")]
    InvalidRootParent(String),

    #[error("Invalid schema configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl SchemaError {
    pub fn invalid_identifier(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            role: role.into(),
            name: name.into(),
        }
    }

    pub fn duplicate_column(
        name: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::DuplicateColumn {
            name: name.into(),
            first: first.into(),
            second: second.into(),
        }
    }
}

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
