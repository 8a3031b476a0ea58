//! Node deletion: a single node, or a node with its subtree.

use nestset_core::{NodeKey, Value};
use nestset_schema::Schema;
use nestset_store::RowStore;
use nestset_transaction::run_locked;

use crate::baseline::{partition_clause, read_baseline};
use crate::error::MutationResult;
use crate::payload::parent_value;
use crate::result::DeleteOutcome;
use crate::shift::ShiftPlan;

/// Remove exactly one node and promote its children to its former parent.
///
/// The node's interval shrinks to nothing: every descendant moves one unit
/// left, and the two units the node occupied are closed after its right
/// bound.
pub fn delete_node<S: RowStore + ?Sized>(
    store: &mut S,
    schema: &Schema,
    key: NodeKey,
) -> MutationResult<DeleteOutcome> {
    run_locked(store, schema.table(), |txn| {
        let base = read_baseline(&**txn, schema, key, None)?;

        let mut params = vec![Value::Int(base.left)];
        let filter = partition_clause(schema, base.tree, &mut params);
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?{}",
            schema.q_table(),
            schema.q_left(),
            filter
        );
        let removed = txn.execute(&sql, &params)?;

        let mut params = vec![Value::Int(base.left), Value::Int(base.right)];
        let filter = partition_clause(schema, base.tree, &mut params);
        let sql = format!(
            "UPDATE {table} SET {l} = {l} - 1, {r} = {r} - 1 WHERE {l} BETWEEN ? AND ?{filter}",
            table = schema.q_table(),
            l = schema.q_left(),
            r = schema.q_right(),
            filter = filter
        );
        let mut renumbered = txn.execute(&sql, &params)?;

        let mut params = vec![parent_value(schema, base.parent), Value::Int(key.raw())];
        let filter = partition_clause(schema, base.tree, &mut params);
        let sql = format!(
            "UPDATE {table} SET {p} = ? WHERE {p} = ?{filter}",
            table = schema.q_table(),
            p = schema.q_parent(),
            filter = filter
        );
        let promoted = txn.execute(&sql, &params)?;

        renumbered += ShiftPlan::close_gap(base.right, 2).apply(&mut **txn, schema, base.tree)?;

        tracing::debug!(
            table = schema.table(),
            key = %key,
            left = base.left,
            right = base.right,
            tree = ?base.tree,
            promoted,
            "deleted node"
        );
        Ok(DeleteOutcome::new(removed, renumbered))
    })
}

/// Remove a node together with every descendant and close the gap left
/// behind.
pub fn delete_node_and_children<S: RowStore + ?Sized>(
    store: &mut S,
    schema: &Schema,
    key: NodeKey,
) -> MutationResult<DeleteOutcome> {
    run_locked(store, schema.table(), |txn| {
        let base = read_baseline(&**txn, schema, key, None)?;

        let mut params = vec![Value::Int(base.left), Value::Int(base.right)];
        let filter = partition_clause(schema, base.tree, &mut params);
        let sql = format!(
            "DELETE FROM {table} WHERE {l} BETWEEN ? AND ?{filter}",
            table = schema.q_table(),
            l = schema.q_left(),
            filter = filter
        );
        let removed = txn.execute(&sql, &params)?;

        let renumbered =
            ShiftPlan::close_gap(base.right, base.width()).apply(&mut **txn, schema, base.tree)?;

        tracing::debug!(
            table = schema.table(),
            key = %key,
            left = base.left,
            right = base.right,
            tree = ?base.tree,
            removed,
            "deleted subtree"
        );
        Ok(DeleteOutcome::new(removed, renumbered))
    })
}
