//! Whole-partition deletion.

use nestset_core::{TreeId, Value};
use nestset_schema::Schema;
use nestset_store::RowStore;
use nestset_transaction::run_locked;

use crate::error::{MutationError, MutationResult};
use crate::result::DeleteOutcome;

/// Delete every row of partition `tree`. Other partitions keep their bounds.
pub fn delete_tree<S: RowStore + ?Sized>(
    store: &mut S,
    schema: &Schema,
    tree: TreeId,
) -> MutationResult<DeleteOutcome> {
    let Some(column) = schema.q_tree() else {
        return Err(MutationError::configuration(format!(
            "table {} has no tree column, cannot delete {}",
            schema.table(),
            tree
        )));
    };

    run_locked(store, schema.table(), |txn| {
        let sql = format!("DELETE FROM {} WHERE {} = ?", schema.q_table(), column);
        let removed = txn.execute(&sql, &[Value::Int(tree.raw())])?;

        tracing::debug!(table = schema.table(), tree = %tree, removed, "deleted tree");
        Ok(DeleteOutcome::new(removed, 0))
    })
}
