//! Mutation executor - coordinates mutation operations.
//!
//! The executor delegates to the operation modules in `ops/`:
//! - `ops/create.rs` - roots, first children, next siblings
//! - `ops/delete.rs` - single node and subtree deletion
//! - `ops/tree.rs` - whole partition deletion

use nestset_core::{Attributes, NodeKey, TreeId};
use nestset_schema::Schema;
use nestset_store::RowStore;

use crate::error::MutationResult;
use crate::ops;
use crate::result::DeleteOutcome;

/// Mutation executor.
pub struct MutationExecutor<'r, 's, S: RowStore + ?Sized> {
    schema: &'r Schema,
    store: &'s mut S,
}

impl<'r, 's, S: RowStore + ?Sized> MutationExecutor<'r, 's, S> {
    /// Create a new executor.
    pub fn new(schema: &'r Schema, store: &'s mut S) -> Self {
        Self { schema, store }
    }

    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// Create the root of a new tree.
    pub fn create_root(
        &mut self,
        data: &Attributes,
        tree: Option<TreeId>,
    ) -> MutationResult<NodeKey> {
        ops::create_root(self.store, self.schema, data, tree)
    }

    /// Insert a node as the first child of `parent`.
    pub fn create_child(
        &mut self,
        parent: NodeKey,
        data: &Attributes,
        tree: Option<TreeId>,
    ) -> MutationResult<NodeKey> {
        ops::create_child(self.store, self.schema, parent, data, tree)
    }

    /// Insert a node right after `sibling`.
    pub fn create_sibling(
        &mut self,
        sibling: NodeKey,
        data: &Attributes,
        tree: Option<TreeId>,
    ) -> MutationResult<NodeKey> {
        ops::create_sibling(self.store, self.schema, sibling, data, tree)
    }

    /// Delete one node, promoting its children.
    pub fn delete_node(&mut self, key: NodeKey) -> MutationResult<DeleteOutcome> {
        ops::delete_node(self.store, self.schema, key)
    }

    /// Delete a node and all of its descendants.
    pub fn delete_node_and_children(&mut self, key: NodeKey) -> MutationResult<DeleteOutcome> {
        ops::delete_node_and_children(self.store, self.schema, key)
    }

    /// Delete every node of partition `tree`.
    pub fn delete_tree(&mut self, tree: TreeId) -> MutationResult<DeleteOutcome> {
        ops::delete_tree(self.store, self.schema, tree)
    }
}
