//! Node creation: roots, first children, next siblings.

use nestset_core::{Attributes, NodeKey, TreeId, Value};
use nestset_schema::Schema;
use nestset_store::RowStore;
use nestset_transaction::run_locked;

use super::{reject_tree_id, require_partition};
use crate::baseline::{partition_clause, read_baseline};
use crate::error::{MutationError, MutationResult};
use crate::payload::{insert_root_in_new_tree, insert_row, NewRow, Payload};
use crate::shift::ShiftPlan;

/// Units a freshly inserted leaf occupies.
const LEAF_WIDTH: i64 = 2;

/// Create the root of a new tree with bounds `[1, 2]`.
///
/// On a multi-tree schema without an explicit `tree`, the partition id is
/// allocated as one past the current maximum; that insert is a single
/// statement and takes no table lock. An explicit `tree`, or the only tree
/// of a single-tree schema, must still be empty: the emptiness check and the
/// insert run in one locked transaction and fail with `PartitionOccupied`
/// otherwise.
pub fn create_root<S: RowStore + ?Sized>(
    store: &mut S,
    schema: &Schema,
    data: &Attributes,
    tree: Option<TreeId>,
) -> MutationResult<NodeKey> {
    let payload = Payload::validate(schema, data)?;

    let key = match (schema.tree_column(), tree) {
        (None, Some(tree)) => return Err(reject_tree_id(schema, tree)),
        (Some(column), None) => insert_root_in_new_tree(store, schema, &payload, column)?,
        (_, tree) => run_locked(store, schema.table(), |txn| {
            if partition_has_rows(&**txn, schema, tree)? {
                return Err(MutationError::partition_occupied(schema.table(), tree));
            }
            let row = NewRow {
                left: 1,
                right: 2,
                parent: None,
                tree,
            };
            Ok(insert_row(&mut **txn, schema, &row, &payload)?)
        })?,
    };

    tracing::debug!(table = schema.table(), key = %key, tree = ?tree, "created root");
    Ok(key)
}

fn partition_has_rows<S: RowStore + ?Sized>(
    store: &S,
    schema: &Schema,
    tree: Option<TreeId>,
) -> MutationResult<bool> {
    let mut params: Vec<Value> = Vec::new();
    let filter = partition_clause(schema, tree, &mut params);
    let sql = format!(
        "SELECT 1 FROM {} WHERE 1 = 1{} LIMIT 1",
        schema.q_table(),
        filter
    );
    Ok(store.query_row(&sql, &params)?.is_some())
}

/// Insert a new node as the first child of `parent`.
///
/// Every bound greater than the parent's left bound moves up by two, which
/// opens the slot `[parent.left + 1, parent.left + 2]` for the new leaf.
pub fn create_child<S: RowStore + ?Sized>(
    store: &mut S,
    schema: &Schema,
    parent: NodeKey,
    data: &Attributes,
    tree: Option<TreeId>,
) -> MutationResult<NodeKey> {
    let tree = require_partition(schema, tree)?;
    let payload = Payload::validate(schema, data)?;

    run_locked(store, schema.table(), |txn| {
        let base = read_baseline(&**txn, schema, parent, tree)?;
        let shifted =
            ShiftPlan::open_gap(base.left, LEAF_WIDTH).apply(&mut **txn, schema, base.tree)?;

        let row = NewRow {
            left: base.left + 1,
            right: base.left + LEAF_WIDTH,
            parent: Some(parent),
            tree: base.tree,
        };
        let key = insert_row(&mut **txn, schema, &row, &payload)?;

        tracing::debug!(
            table = schema.table(),
            key = %key,
            parent = %parent,
            left = row.left,
            right = row.right,
            shifted,
            "created child"
        );
        Ok(key)
    })
}

/// Insert a new node immediately after `sibling`, under the same parent.
pub fn create_sibling<S: RowStore + ?Sized>(
    store: &mut S,
    schema: &Schema,
    sibling: NodeKey,
    data: &Attributes,
    tree: Option<TreeId>,
) -> MutationResult<NodeKey> {
    let tree = require_partition(schema, tree)?;
    let payload = Payload::validate(schema, data)?;

    run_locked(store, schema.table(), |txn| {
        let base = read_baseline(&**txn, schema, sibling, tree)?;
        let shifted =
            ShiftPlan::open_gap(base.right, LEAF_WIDTH).apply(&mut **txn, schema, base.tree)?;

        let row = NewRow {
            left: base.right + 1,
            right: base.right + LEAF_WIDTH,
            parent: base.parent,
            tree: base.tree,
        };
        let key = insert_row(&mut **txn, schema, &row, &payload)?;

        tracing::debug!(
            table = schema.table(),
            key = %key,
            sibling = %sibling,
            left = row.left,
            right = row.right,
            shifted,
            "created sibling"
        );
        Ok(key)
    })
}
