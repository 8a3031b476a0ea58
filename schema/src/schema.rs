//! The immutable schema descriptor.

use crate::builder::SchemaBuilder;
use crate::ident::quote_ident;

/// How a root's parent column is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootParent {
    /// Roots carry parent `0`.
    #[default]
    Zero,
    /// Roots carry parent `NULL`.
    Null,
}

/// Names of the table and structural columns a nested set lives in.
///
/// Built once through [`SchemaBuilder`] and never mutated afterwards. All
/// names have been validated as plain identifiers, so the quoted forms can
/// be spliced into statement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub(crate) table: String,
    pub(crate) key_column: String,
    pub(crate) parent_column: String,
    pub(crate) tree_column: Option<String>,
    pub(crate) left_column: String,
    pub(crate) right_column: String,
    pub(crate) root_parent: RootParent,
}

impl Schema {
    /// Start building a schema for `table` with the default column names
    /// (`id`, `parent_id`, `lft`, `rgt`, no tree column).
    pub fn builder(table: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(table)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    pub fn parent_column(&self) -> &str {
        &self.parent_column
    }

    pub fn tree_column(&self) -> Option<&str> {
        self.tree_column.as_deref()
    }

    pub fn left_column(&self) -> &str {
        &self.left_column
    }

    pub fn right_column(&self) -> &str {
        &self.right_column
    }

    pub fn root_parent(&self) -> RootParent {
        self.root_parent
    }

    /// Returns true if several independent trees share the table.
    pub fn is_multi_tree(&self) -> bool {
        self.tree_column.is_some()
    }

    /// Returns true if `name` is one of the columns the engine manages.
    pub fn is_structural(&self, name: &str) -> bool {
        name == self.key_column
            || name == self.parent_column
            || name == self.left_column
            || name == self.right_column
            || self.tree_column.as_deref() == Some(name)
    }

    // ========== Quoted forms ==========

    pub fn q_table(&self) -> String {
        quote_ident(&self.table)
    }

    pub fn q_key(&self) -> String {
        quote_ident(&self.key_column)
    }

    pub fn q_parent(&self) -> String {
        quote_ident(&self.parent_column)
    }

    pub fn q_left(&self) -> String {
        quote_ident(&self.left_column)
    }

    pub fn q_right(&self) -> String {
        quote_ident(&self.right_column)
    }

    pub fn q_tree(&self) -> Option<String> {
        self.tree_column.as_deref().map(quote_ident)
    }
}
