//! SQLite backend.

use std::path::Path;
use std::time::Duration;

use nestset_core::{NodeKey, Value};
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};

use crate::error::{StoreError, StoreResult};
use crate::lock::{TableGuard, TableLocks};
use crate::row::Row;
use crate::store::RowStore;

const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Row store backed by a single SQLite connection.
///
/// `BEGIN IMMEDIATE` takes the database write lock when a transaction opens,
/// and [`RowStore::lock_table_exclusive`] additionally takes the per-table
/// lock from the shared [`TableLocks`] registry.
///
/// Stores built by [`open`](Self::open) and
/// [`open_in_memory`](Self::open_in_memory) share [`TableLocks::global`],
/// which is keyed by table name alone: mutations of same-named tables in
/// unrelated databases wait for each other. Build the store with
/// [`from_connection`](Self::from_connection) and a private registry to keep
/// databases apart.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    locks: TableLocks,
    held: Vec<TableGuard>,
    in_transaction: bool,
    lock_timeout: Duration,
}

impl SqliteStore {
    /// Open (or create) a database file using the process-wide lock registry.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?, TableLocks::global())
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?, TableLocks::global())
    }

    /// Wrap an existing connection, sharing locks through `locks`.
    pub fn from_connection(conn: Connection, locks: TableLocks) -> StoreResult<Self> {
        conn.busy_timeout(DEFAULT_LOCK_TIMEOUT)?;
        Ok(Self {
            conn,
            locks,
            held: Vec::new(),
            in_transaction: false,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        })
    }

    /// How long to wait for both the SQLite write lock and the table lock.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> StoreResult<Self> {
        self.conn.busy_timeout(timeout)?;
        self.lock_timeout = timeout;
        Ok(self)
    }

    /// Run one or more statements without parameters (schema setup).
    pub fn execute_batch(&self, sql: &str) -> StoreResult<()> {
        tracing::trace!(sql, "execute batch");
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn release_locks(&mut self) {
        for guard in self.held.drain(..) {
            tracing::trace!(table = guard.table(), "table lock released");
        }
    }
}

impl RowStore for SqliteStore {
    fn begin_transaction(&mut self) -> StoreResult<()> {
        if self.in_transaction {
            return Err(StoreError::TransactionActive);
        }
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        self.in_transaction = true;
        Ok(())
    }

    fn commit(&mut self) -> StoreResult<()> {
        if !self.in_transaction {
            return Err(StoreError::NoTransaction);
        }
        self.conn.execute_batch("COMMIT")?;
        self.in_transaction = false;
        self.release_locks();
        Ok(())
    }

    fn rollback(&mut self) -> StoreResult<()> {
        if !self.in_transaction {
            return Err(StoreError::NoTransaction);
        }
        self.in_transaction = false;
        self.release_locks();
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    fn lock_table_exclusive(&mut self, table: &str) -> StoreResult<()> {
        if self.held.iter().any(|guard| guard.table() == table) {
            return Ok(());
        }
        let guard = self
            .locks
            .acquire_timeout(table, self.lock_timeout)
            .ok_or_else(|| StoreError::lock_timeout(table))?;
        tracing::trace!(table, "table lock acquired");
        self.held.push(guard);
        Ok(())
    }

    fn unlock_tables(&mut self) -> StoreResult<()> {
        self.release_locks();
        Ok(())
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> StoreResult<u64> {
        tracing::trace!(sql, params = params.len(), "execute");
        let affected = self.conn.execute(sql, params_from_iter(params.iter().map(to_sql)))?;
        Ok(affected as u64)
    }

    fn insert(&mut self, sql: &str, params: &[Value]) -> StoreResult<NodeKey> {
        tracing::trace!(sql, params = params.len(), "insert");
        self.conn.execute(sql, params_from_iter(params.iter().map(to_sql)))?;
        Ok(NodeKey::new(self.conn.last_insert_rowid()))
    }

    fn query(&self, sql: &str, params: &[Value]) -> StoreResult<Vec<Row>> {
        tracing::trace!(sql, params = params.len(), "query");
        let mut stmt = self.conn.prepare(sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let mut rows = stmt.query(params_from_iter(params.iter().map(to_sql)))?;

        let mut out = Vec::new();
        while let Some(sql_row) = rows.next()? {
            let mut row = Row::new();
            for (i, name) in names.iter().enumerate() {
                row.push(name.clone(), from_sql(sql_row.get_ref(i)?));
            }
            out.push(row);
        }
        Ok(out)
    }
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Int(i) => SqlValue::Integer(*i),
        Value::Float(f) => SqlValue::Real(*f),
        Value::String(s) => SqlValue::Text(s.clone()),
    }
}

// Blobs have no Value counterpart; they surface as lossy text.
fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
