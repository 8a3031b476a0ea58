//! Mutation operation implementations.
//!
//! Each operation is implemented in its own module:
//! - `create` - create_root, create_child, create_sibling
//! - `delete` - delete_node, delete_node_and_children
//! - `tree` - delete_tree

mod create;
mod delete;
mod tree;

pub use create::{create_child, create_root, create_sibling};
pub use delete::{delete_node, delete_node_and_children};
pub use tree::delete_tree;

use nestset_core::TreeId;
use nestset_schema::Schema;

use crate::error::{MutationError, MutationResult};

/// Check that a partition id is supplied exactly when the schema needs one.
pub(crate) fn require_partition(
    schema: &Schema,
    tree: Option<TreeId>,
) -> MutationResult<Option<TreeId>> {
    match (schema.tree_column(), tree) {
        (Some(column), None) => Err(MutationError::ambiguous_partition(schema.table(), column)),
        (None, Some(tree)) => Err(reject_tree_id(schema, tree)),
        (_, tree) => Ok(tree),
    }
}

pub(crate) fn reject_tree_id(schema: &Schema, tree: TreeId) -> MutationError {
    MutationError::configuration(format!(
        "table {} has no tree column, cannot place a node in {}",
        schema.table(),
        tree
    ))
}
