//! Caller attribute validation and insert building.

use nestset_core::{Attributes, NodeKey, TreeId, Value};
use nestset_schema::{is_valid_identifier, quote_ident, RootParent, Schema};
use nestset_store::{RowStore, StoreResult};

use crate::error::{MutationError, MutationResult};

/// Caller-supplied columns, validated and sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Payload {
    columns: Vec<(String, Value)>,
}

impl Payload {
    /// Check that every attribute names a plain, non-structural column.
    pub fn validate(schema: &Schema, data: &Attributes) -> MutationResult<Self> {
        let mut columns = Vec::with_capacity(data.len());
        for (name, value) in data {
            if !is_valid_identifier(name) {
                return Err(MutationError::configuration(format!(
                    "invalid attribute column name {:?}",
                    name
                )));
            }
            if schema.is_structural(name) {
                return Err(MutationError::configuration(format!(
                    "attribute {} is managed by the tree and cannot be set",
                    name
                )));
            }
            columns.push((name.clone(), value.clone()));
        }
        columns.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Self { columns })
    }
}

/// Structural values of a row about to be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NewRow {
    pub left: i64,
    pub right: i64,
    pub parent: Option<NodeKey>,
    pub tree: Option<TreeId>,
}

/// The value written to the parent column for `parent`.
pub(crate) fn parent_value(schema: &Schema, parent: Option<NodeKey>) -> Value {
    match (parent, schema.root_parent()) {
        (Some(key), _) => Value::Int(key.raw()),
        (None, RootParent::Zero) => Value::Int(0),
        (None, RootParent::Null) => Value::Null,
    }
}

fn structural_columns(schema: &Schema, row: &NewRow) -> (Vec<String>, Vec<Value>) {
    let mut columns = vec![schema.q_left(), schema.q_right(), schema.q_parent()];
    let mut values = vec![
        Value::Int(row.left),
        Value::Int(row.right),
        parent_value(schema, row.parent),
    ];
    if let (Some(column), Some(tree)) = (schema.q_tree(), row.tree) {
        columns.push(column);
        values.push(Value::Int(tree.raw()));
    }
    (columns, values)
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Insert one row and return its generated key.
pub(crate) fn insert_row<S: RowStore + ?Sized>(
    store: &mut S,
    schema: &Schema,
    row: &NewRow,
    payload: &Payload,
) -> StoreResult<NodeKey> {
    let (mut columns, mut values) = structural_columns(schema, row);
    for (name, value) in &payload.columns {
        columns.push(quote_ident(name));
        values.push(value.clone());
    }

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.q_table(),
        columns.join(", "),
        placeholders(values.len())
    );
    store.insert(&sql, &values)
}

/// Insert a root into a fresh partition numbered one past the current
/// maximum, reading the maximum and inserting in a single statement.
pub(crate) fn insert_root_in_new_tree<S: RowStore + ?Sized>(
    store: &mut S,
    schema: &Schema,
    payload: &Payload,
    tree_column: &str,
) -> StoreResult<NodeKey> {
    let row = NewRow {
        left: 1,
        right: 2,
        parent: None,
        tree: None,
    };
    let (mut columns, mut values) = structural_columns(schema, &row);
    for (name, value) in &payload.columns {
        columns.push(quote_ident(name));
        values.push(value.clone());
    }
    let quoted_tree = quote_ident(tree_column);
    columns.push(quoted_tree.clone());

    let sql = format!(
        "INSERT INTO {table} ({columns}) SELECT {values}, COALESCE(MAX({tree}), 0) + 1 FROM {table}",
        table = schema.q_table(),
        columns = columns.join(", "),
        values = placeholders(values.len()),
        tree = quoted_tree
    );
    store.insert(&sql, &values)
}
