//! Process-wide exclusive table locks.
//!
//! SQLite has no `LOCK TABLE`. Every store that shares a [`TableLocks`]
//! registry serializes its mutations of a table through one mutex per table
//! name, held for the lifetime of a [`TableGuard`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};

static GLOBAL: Lazy<TableLocks> = Lazy::new(TableLocks::new);

/// Registry of per-table mutexes.
#[derive(Clone, Default)]
pub struct TableLocks {
    tables: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl TableLocks {
    /// Create an empty, private registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by every store in the process.
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    fn table_mutex(&self, table: &str) -> Arc<Mutex<()>> {
        let mut tables = self.tables.lock();
        tables
            .entry(table.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Block until the lock on `table` is free, then take it.
    pub fn acquire(&self, table: &str) -> TableGuard {
        let guard = self.table_mutex(table).lock_arc();
        TableGuard {
            table: table.to_string(),
            _guard: guard,
        }
    }

    /// Wait at most `timeout` for the lock on `table`.
    pub fn acquire_timeout(&self, table: &str, timeout: Duration) -> Option<TableGuard> {
        self.table_mutex(table)
            .try_lock_arc_for(timeout)
            .map(|guard| TableGuard {
                table: table.to_string(),
                _guard: guard,
            })
    }

    /// Returns true if some guard currently holds `table`.
    pub fn is_locked(&self, table: &str) -> bool {
        self.tables
            .lock()
            .get(table)
            .map(|mutex| mutex.is_locked())
            .unwrap_or(false)
    }
}

impl fmt::Debug for TableLocks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.lock();
        f.debug_struct("TableLocks")
            .field("tables", &tables.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Exclusive hold on one table. The lock is released on drop.
pub struct TableGuard {
    table: String,
    _guard: ArcMutexGuard<RawMutex, ()>,
}

impl TableGuard {
    pub fn table(&self) -> &str {
        &self.table
    }
}

impl fmt::Debug for TableGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableGuard").field("table", &self.table).finish()
    }
}
