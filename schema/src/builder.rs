//! SchemaBuilder for constructing an immutable Schema.

use crate::error::{SchemaError, SchemaResult};
use crate::ident::is_valid_identifier;
use crate::schema::{RootParent, Schema};

/// Builder for constructing an immutable Schema.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    table: String,
    key_column: String,
    parent_column: String,
    tree_column: Option<String>,
    left_column: String,
    right_column: String,
    root_parent: RootParent,
}

impl SchemaBuilder {
    /// Create a builder with the default column names.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            key_column: "id".to_string(),
            parent_column: "parent_id".to_string(),
            tree_column: None,
            left_column: "lft".to_string(),
            right_column: "rgt".to_string(),
            root_parent: RootParent::Zero,
        }
    }

    pub fn key_column(mut self, name: impl Into<String>) -> Self {
        self.key_column = name.into();
        self
    }

    pub fn parent_column(mut self, name: impl Into<String>) -> Self {
        self.parent_column = name.into();
        self
    }

    /// Declare a tree discriminator column, making the table multi-tree.
    pub fn tree_column(mut self, name: impl Into<String>) -> Self {
        self.tree_column = Some(name.into());
        self
    }

    pub fn left_column(mut self, name: impl Into<String>) -> Self {
        self.left_column = name.into();
        self
    }

    pub fn right_column(mut self, name: impl Into<String>) -> Self {
        self.right_column = name.into();
        self
    }

    pub fn root_parent(mut self, mode: RootParent) -> Self {
        self.root_parent = mode;
        self
    }

    /// Validate all identifiers and build the schema.
    pub fn build(self) -> SchemaResult<Schema> {
        let mut columns: Vec<(&str, &str)> = vec![
            ("key", self.key_column.as_str()),
            ("parent", self.parent_column.as_str()),
            ("left", self.left_column.as_str()),
            ("right", self.right_column.as_str()),
        ];
        if let Some(tree) = &self.tree_column {
            columns.push(("tree", tree.as_str()));
        }

        if !is_valid_identifier(&self.table) {
            return Err(SchemaError::invalid_identifier("table", &self.table));
        }
        for (role, name) in &columns {
            if !is_valid_identifier(name) {
                return Err(SchemaError::invalid_identifier(*role, *name));
            }
        }
        for (i, (first_role, first)) in columns.iter().enumerate() {
            if let Some((second_role, _)) = columns[i + 1..].iter().find(|(_, n)| n == first) {
                return Err(SchemaError::duplicate_column(*first, *first_role, *second_role));
            }
        }

        Ok(Schema {
            table: self.table,
            key_column: self.key_column,
            parent_column: self.parent_column,
            tree_column: self.tree_column,
            left_column: self.left_column,
            right_column: self.right_column,
            root_parent: self.root_parent,
        })
    }
}
