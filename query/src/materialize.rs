//! Row to node conversion.

use nestset_core::{Node, NodeKey, TreeId, Value};
use nestset_schema::Schema;
use nestset_store::Row;

use crate::error::{QueryError, QueryResult};

fn required_int(row: &Row, column: &str) -> QueryResult<i64> {
    match row.get(column) {
        Some(Value::Int(v)) => Ok(*v),
        Some(other) => Err(QueryError::malformed(
            column,
            format!("expected an integer in {}, found {}", column, other.type_name()),
        )),
        None => Err(QueryError::malformed(
            column,
            format!("column {} missing from result", column),
        )),
    }
}

/// Turn a full table row into a [`Node`].
///
/// A parent of NULL or 0 reads as a root. Columns other than the structural
/// ones become attributes.
pub(crate) fn node_from_row(schema: &Schema, row: Row) -> QueryResult<Node> {
    let key = NodeKey::new(required_int(&row, schema.key_column())?);
    let left = required_int(&row, schema.left_column())?;
    let right = required_int(&row, schema.right_column())?;

    let parent = match row.get(schema.parent_column()) {
        None | Some(Value::Null) | Some(Value::Int(0)) => None,
        Some(Value::Int(p)) => Some(NodeKey::new(*p)),
        Some(other) => {
            return Err(QueryError::malformed(
                schema.parent_column(),
                format!("parent of {} is a {}", key, other.type_name()),
            ))
        }
    };

    let tree = match schema.tree_column() {
        None => None,
        Some(column) => match row.get(column) {
            None | Some(Value::Null) => None,
            Some(Value::Int(t)) => Some(TreeId::new(*t)),
            Some(other) => {
                return Err(QueryError::malformed(
                    column,
                    format!("tree of {} is a {}", key, other.type_name()),
                ))
            }
        },
    };

    let attributes = row.into_attributes_except(|name| schema.is_structural(name));
    let mut node = Node::new(key, parent, left, right).with_attributes(attributes);
    node.tree = tree;
    Ok(node)
}

pub(crate) fn nodes_from_rows(schema: &Schema, rows: Vec<Row>) -> QueryResult<Vec<Node>> {
    rows.into_iter()
        .map(|row| node_from_row(schema, row))
        .collect()
}
