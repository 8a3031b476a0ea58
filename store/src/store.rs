//! The row store trait.

use nestset_core::{NodeKey, Value};

use crate::error::StoreResult;
use crate::row::Row;

/// A relational backend the engine can run statements against.
///
/// Statement text only ever contains engine-controlled identifiers; all data
/// travels through `params`, bound positionally to `?` placeholders.
pub trait RowStore {
    /// Open a transaction. Fails if one is already open.
    fn begin_transaction(&mut self) -> StoreResult<()>;

    /// Commit the open transaction and release any table locks.
    fn commit(&mut self) -> StoreResult<()>;

    /// Roll back the open transaction and release any table locks.
    fn rollback(&mut self) -> StoreResult<()>;

    /// Returns true while a transaction is open.
    fn in_transaction(&self) -> bool;

    /// Take the exclusive write lock on `table`. Re-locking a table this
    /// store already holds is a no-op.
    fn lock_table_exclusive(&mut self, table: &str) -> StoreResult<()>;

    /// Release every table lock held by this store.
    fn unlock_tables(&mut self) -> StoreResult<()>;

    /// Run a statement and return the number of affected rows.
    fn execute(&mut self, sql: &str, params: &[Value]) -> StoreResult<u64>;

    /// Run an insert and return the generated key.
    fn insert(&mut self, sql: &str, params: &[Value]) -> StoreResult<NodeKey>;

    /// Run a query and collect every row.
    fn query(&self, sql: &str, params: &[Value]) -> StoreResult<Vec<Row>>;

    /// Run a query and return its first row, if any.
    fn query_row(&self, sql: &str, params: &[Value]) -> StoreResult<Option<Row>> {
        Ok(self.query(sql, params)?.into_iter().next())
    }

    /// Run a query and return the first column of its first row.
    fn query_scalar(&self, sql: &str, params: &[Value]) -> StoreResult<Option<Value>> {
        Ok(self
            .query_row(sql, params)?
            .and_then(|row| row.value_at(0).cloned()))
    }
}
