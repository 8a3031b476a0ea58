//! nestset Store
//!
//! The row store adapter the engine runs its statements through.
//!
//! Responsibilities:
//! - Execute parameterized statements and report affected rows
//! - Begin/commit/rollback transactions
//! - Acquire and release the exclusive table lock
//! - Hand back the last generated key after an insert
//!
//! # Module Structure
//!
//! - `store` - The `RowStore` trait every backend implements
//! - `sqlite` - SQLite backend on top of rusqlite
//! - `lock` - Process-wide per-table lock registry
//! - `row` - Result rows as ordered column/value lists
//! - `error` - Error types for store failures

mod error;
mod lock;
mod row;
mod sqlite;
mod store;

pub use error::{StoreError, StoreResult};
pub use lock::{TableGuard, TableLocks};
pub use row::Row;
pub use sqlite::SqliteStore;
pub use store::RowStore;
