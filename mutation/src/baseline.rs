//! Reading the target row's bounds under the table lock.
//!
//! Every mutation captures the row it is anchored on exactly once, then
//! passes the captured values on to the shift and insert/delete steps.

use nestset_core::{NodeKey, TreeId, Value};
use nestset_schema::Schema;
use nestset_store::RowStore;

use crate::error::{MutationError, MutationResult};

/// Bounds of the anchor row as they were when the lock was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Baseline {
    pub key: NodeKey,
    pub left: i64,
    pub right: i64,
    pub parent: Option<NodeKey>,
    pub tree: Option<TreeId>,
}

impl Baseline {
    pub fn width(&self) -> i64 {
        self.right - self.left + 1
    }
}

/// Append the partition restriction for `tree` to a WHERE clause.
///
/// Single-tree schemas get no restriction. On a multi-tree schema a missing
/// tree id restricts to rows whose tree column is NULL.
pub(crate) fn partition_clause(schema: &Schema, tree: Option<TreeId>, params: &mut Vec<Value>) -> String {
    match (schema.q_tree(), tree) {
        (None, _) => String::new(),
        (Some(column), Some(tree)) => {
            params.push(Value::Int(tree.raw()));
            format!(" AND {} = ?", column)
        }
        (Some(column), None) => format!(" AND {} IS NULL", column),
    }
}

/// Read the baseline of `key`, optionally restricted to partition `tree`.
pub(crate) fn read_baseline<S: RowStore + ?Sized>(
    store: &S,
    schema: &Schema,
    key: NodeKey,
    tree: Option<TreeId>,
) -> MutationResult<Baseline> {
    let mut columns = vec![schema.q_left(), schema.q_right(), schema.q_parent()];
    if let Some(tree_column) = schema.q_tree() {
        columns.push(tree_column);
    }

    let mut params = vec![Value::Int(key.raw())];
    let mut sql = format!(
        "SELECT {} FROM {} WHERE {} = ?",
        columns.join(", "),
        schema.q_table(),
        schema.q_key()
    );
    if tree.is_some() {
        sql.push_str(&partition_clause(schema, tree, &mut params));
    }

    let row = store
        .query_row(&sql, &params)?
        .ok_or_else(|| MutationError::not_found(key))?;

    let left = row
        .value_at(0)
        .and_then(Value::as_int)
        .ok_or_else(|| MutationError::malformed_row(key, schema.left_column()))?;
    let right = row
        .value_at(1)
        .and_then(Value::as_int)
        .ok_or_else(|| MutationError::malformed_row(key, schema.right_column()))?;
    if left >= right {
        return Err(MutationError::malformed_row(key, schema.right_column()));
    }
    let parent = match row.value_at(2) {
        None | Some(Value::Null) | Some(Value::Int(0)) => None,
        Some(Value::Int(p)) => Some(NodeKey::new(*p)),
        Some(_) => return Err(MutationError::malformed_row(key, schema.parent_column())),
    };
    let tree = match (schema.tree_column(), row.value_at(3)) {
        (None, _) | (Some(_), None) | (Some(_), Some(Value::Null)) => None,
        (Some(_), Some(Value::Int(t))) => Some(TreeId::new(*t)),
        (Some(column), Some(_)) => return Err(MutationError::malformed_row(key, column)),
    };

    Ok(Baseline {
        key,
        left,
        right,
        parent,
        tree,
    })
}
