//! Loading a schema from TOML configuration.
//!
//! ```toml
//! table = "categories"
//! key_column = "id"
//! tree_column = "tree_id"
//! root_parent = "null"
//! ```
//!
//! Every key except `table` is optional and falls back to the builder
//! defaults.

use serde::Deserialize;

use crate::builder::SchemaBuilder;
use crate::error::{SchemaError, SchemaResult};
use crate::schema::{RootParent, Schema};

/// Raw schema configuration as it appears in a config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    pub table: String,
    #[serde(default)]
    pub key_column: Option<String>,
    #[serde(default)]
    pub parent_column: Option<String>,
    #[serde(default)]
    pub tree_column: Option<String>,
    #[serde(default)]
    pub left_column: Option<String>,
    #[serde(default)]
    pub right_column: Option<String>,
    #[serde(default)]
    pub root_parent: Option<String>,
}

impl SchemaConfig {
    /// Parse a configuration document.
    pub fn from_toml_str(source: &str) -> SchemaResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Validate the configuration and turn it into a schema.
    pub fn into_schema(self) -> SchemaResult<Schema> {
        let mut builder = SchemaBuilder::new(self.table);
        if let Some(name) = self.key_column {
            builder = builder.key_column(name);
        }
        if let Some(name) = self.parent_column {
            builder = builder.parent_column(name);
        }
        if let Some(name) = self.tree_column {
            builder = builder.tree_column(name);
        }
        if let Some(name) = self.left_column {
            builder = builder.left_column(name);
        }
        if let Some(name) = self.right_column {
            builder = builder.right_column(name);
        }
        if let Some(mode) = self.root_parent {
            builder = builder.root_parent(parse_root_parent(&mode)?);
        }
        builder.build()
    }
}

fn parse_root_parent(mode: &str) -> SchemaResult<RootParent> {
    match mode.to_ascii_lowercase().as_str() {
        "zero" | "0" => Ok(RootParent::Zero),
        "null" => Ok(RootParent::Null),
        _ => Err(SchemaError::InvalidRootParent(mode.to_string())),
    }
}

impl Schema {
    /// Load a schema from a TOML document.
    pub fn from_toml_str(source: &str) -> SchemaResult<Schema> {
        SchemaConfig::from_toml_str(source)?.into_schema()
    }
}
