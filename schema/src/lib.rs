//! nestset Schema
//!
//! Immutable description of the table a nested set lives in.
//!
//! Responsibilities:
//! - Name the table and its structural columns (key, parent, left, right, tree)
//! - Validate every identifier once, at construction
//! - Quote identifiers for statement text
//! - Load the same descriptor from TOML configuration

mod builder;
mod config;
mod error;
mod ident;
mod schema;

pub use builder::SchemaBuilder;
pub use config::SchemaConfig;
pub use error::{SchemaError, SchemaResult};
pub use ident::{is_valid_identifier, quote_ident};
pub use schema::{RootParent, Schema};
