//! Table setup helpers.

use nestset_core::Node;
use nestset_schema::Schema;
use nestset_session::NestedSet;
use nestset_store::{RowStore, SqliteStore, StoreResult};

use crate::error::{ExampleError, ExampleResult};

/// Name of the free-text column every fixture table carries.
pub const LABEL_COLUMN: &str = "label";

/// Create the table described by `schema`, plus a `label` text column.
pub fn create_table(store: &SqliteStore, schema: &Schema) -> StoreResult<()> {
    let mut columns = vec![
        format!("{} INTEGER PRIMARY KEY", schema.q_key()),
        format!("{} INTEGER", schema.q_parent()),
    ];
    if let Some(tree) = schema.q_tree() {
        columns.push(format!("{} INTEGER", tree));
    }
    columns.push(format!("{} INTEGER NOT NULL", schema.q_left()));
    columns.push(format!("{} INTEGER NOT NULL", schema.q_right()));
    columns.push(format!("{} TEXT", LABEL_COLUMN));

    store.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        schema.q_table(),
        columns.join(", ")
    ))
}

/// A fresh in-memory table for `schema`.
pub fn memory_set(schema: Schema) -> ExampleResult<NestedSet<SqliteStore>> {
    let store = SqliteStore::open_in_memory().map_err(|e| ExampleError::setup(e.to_string()))?;
    create_table(&store, &schema).map_err(|e| ExampleError::setup(e.to_string()))?;
    Ok(NestedSet::new(schema, store))
}

/// Every node of the table, by partition and left bound.
pub fn all_nodes<S: RowStore>(set: &NestedSet<S>) -> ExampleResult<Vec<Node>> {
    set.get_all().map_err(|e| ExampleError::setup(e.to_string()))
}
