//! The table handle.

use std::path::Path;

use nestset_core::{Attributes, Node, NodeKey, TreeId};
use nestset_mutation::{DeleteOutcome, MutationExecutor};
use nestset_query::{build_forest, QueryExecutor, TreeNode};
use nestset_schema::Schema;
use nestset_store::{RowStore, SqliteStore};

use crate::error::SessionResult;

/// A nested-set table: its schema and the store holding its rows.
pub struct NestedSet<S: RowStore> {
    schema: Schema,
    store: S,
}

impl NestedSet<SqliteStore> {
    /// Open a table in a SQLite database file.
    pub fn open(path: impl AsRef<Path>, schema: Schema) -> SessionResult<Self> {
        Ok(Self::new(schema, SqliteStore::open(path)?))
    }

    /// Open a table in a private in-memory database.
    pub fn open_in_memory(schema: Schema) -> SessionResult<Self> {
        Ok(Self::new(schema, SqliteStore::open_in_memory()?))
    }
}

impl<S: RowStore> NestedSet<S> {
    pub fn new(schema: Schema, store: S) -> Self {
        tracing::debug!(
            table = schema.table(),
            multi_tree = schema.is_multi_tree(),
            "nested set opened"
        );
        Self { schema, store }
    }

    /// Build the schema from a TOML document.
    pub fn from_toml(config: &str, store: S) -> SessionResult<Self> {
        Ok(Self::new(Schema::from_toml_str(config)?, store))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn writer(&mut self) -> MutationExecutor<'_, '_, S> {
        MutationExecutor::new(&self.schema, &mut self.store)
    }

    fn reader(&self) -> QueryExecutor<'_, '_, S> {
        QueryExecutor::new(&self.schema, &self.store)
    }

    // ========== Writes ==========

    pub fn create_root(
        &mut self,
        data: &Attributes,
        tree: Option<TreeId>,
    ) -> SessionResult<NodeKey> {
        Ok(self.writer().create_root(data, tree)?)
    }

    pub fn create_child(
        &mut self,
        parent: NodeKey,
        data: &Attributes,
        tree: Option<TreeId>,
    ) -> SessionResult<NodeKey> {
        Ok(self.writer().create_child(parent, data, tree)?)
    }

    pub fn create_sibling(
        &mut self,
        sibling: NodeKey,
        data: &Attributes,
        tree: Option<TreeId>,
    ) -> SessionResult<NodeKey> {
        Ok(self.writer().create_sibling(sibling, data, tree)?)
    }

    pub fn delete_node(&mut self, key: NodeKey) -> SessionResult<DeleteOutcome> {
        Ok(self.writer().delete_node(key)?)
    }

    pub fn delete_node_and_children(&mut self, key: NodeKey) -> SessionResult<DeleteOutcome> {
        Ok(self.writer().delete_node_and_children(key)?)
    }

    pub fn delete_tree(&mut self, tree: TreeId) -> SessionResult<DeleteOutcome> {
        Ok(self.writer().delete_tree(tree)?)
    }

    /// Insert a first child under `node`, in `node`'s partition.
    pub fn add_child(&mut self, node: &Node, data: &Attributes) -> SessionResult<NodeKey> {
        self.create_child(node.key, data, node.tree)
    }

    /// Insert a sibling right after `node`, in `node`'s partition.
    pub fn add_sibling(&mut self, node: &Node, data: &Attributes) -> SessionResult<NodeKey> {
        self.create_sibling(node.key, data, node.tree)
    }

    // ========== Reads ==========

    pub fn get_node(&self, key: NodeKey) -> SessionResult<Option<Node>> {
        Ok(self.reader().get_node(key)?)
    }

    pub fn get_parent(&self, key: NodeKey) -> SessionResult<Option<Node>> {
        Ok(self.reader().get_parent(key)?)
    }

    pub fn get_children(&self, key: NodeKey) -> SessionResult<Vec<Node>> {
        Ok(self.reader().get_children(key)?)
    }

    pub fn count_children(&self, key: NodeKey) -> SessionResult<u64> {
        Ok(self.reader().count_children(key)?)
    }

    pub fn has_children(&self, key: NodeKey) -> SessionResult<bool> {
        Ok(self.reader().has_children(key)?)
    }

    pub fn get_ancestors(&self, key: NodeKey) -> SessionResult<Vec<Node>> {
        Ok(self.reader().get_ancestors(key)?)
    }

    pub fn get_tree(&self, key: NodeKey) -> SessionResult<Vec<Node>> {
        Ok(self.reader().get_tree(key)?)
    }

    pub fn get_descendants(&self, key: NodeKey) -> SessionResult<Vec<Node>> {
        Ok(self.reader().get_descendants(key)?)
    }

    pub fn get_roots(&self) -> SessionResult<Vec<Node>> {
        Ok(self.reader().get_roots()?)
    }

    pub fn get_tree_leafs(&self, tree: Option<TreeId>) -> SessionResult<Vec<Node>> {
        Ok(self.reader().get_tree_leafs(tree)?)
    }

    pub fn get_all(&self) -> SessionResult<Vec<Node>> {
        Ok(self.reader().get_all()?)
    }

    /// The subtree at `key`, nested. `None` if `key` does not exist.
    pub fn get_hierarchy(&self, key: NodeKey) -> SessionResult<Option<TreeNode>> {
        let nodes = self.get_tree(key)?;
        Ok(build_forest(nodes).into_iter().next())
    }
}
