//! The locked transaction guard.

use std::ops::{Deref, DerefMut};

use nestset_store::{RowStore, StoreError, StoreResult};

/// Lifecycle of a [`LockedTransaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// Transaction open, table lock held.
    Active,
    /// Lock released and changes committed.
    Committed,
    /// Lock released and changes discarded.
    RolledBack,
}

/// An open transaction holding the exclusive lock on one table.
///
/// The guard dereferences to the store so statements run inside the
/// transaction. Dropping it without calling [`commit`](Self::commit)
/// releases the lock and rolls back.
pub struct LockedTransaction<'s, S: RowStore + ?Sized> {
    store: &'s mut S,
    table: String,
    state: TransactionState,
}

impl<'s, S: RowStore + ?Sized> LockedTransaction<'s, S> {
    /// Begin a transaction on `store` and take the lock on `table`.
    pub fn begin(store: &'s mut S, table: &str) -> StoreResult<Self> {
        store.begin_transaction()?;
        if let Err(e) = store.lock_table_exclusive(table) {
            if let Err(rollback_err) = store.rollback() {
                tracing::warn!(table, error = %rollback_err, "rollback after failed lock also failed");
            }
            return Err(e);
        }
        Ok(Self {
            store,
            table: table.to_string(),
            state: TransactionState::Active,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Release the lock and commit.
    ///
    /// If either step fails the guard is dropped still active, so the
    /// transaction is rolled back before the error reaches the caller.
    pub fn commit(mut self) -> StoreResult<()> {
        self.store.unlock_tables()?;
        self.store.commit()?;
        self.state = TransactionState::Committed;
        Ok(())
    }

    /// Release the lock and roll back.
    pub fn rollback(mut self) -> StoreResult<()> {
        self.state = TransactionState::RolledBack;
        let unlocked = self.store.unlock_tables();
        let rolled_back = self.store.rollback();
        unlocked.and(rolled_back)
    }

    fn abort(&mut self) {
        self.state = TransactionState::RolledBack;
        if let Err(e) = self.store.unlock_tables() {
            tracing::warn!(table = %self.table, error = %e, "failed to release table lock");
        }
        if self.store.in_transaction() {
            if let Err(e) = self.store.rollback() {
                tracing::warn!(table = %self.table, error = %e, "rollback failed");
            }
        }
    }
}

impl<S: RowStore + ?Sized> Deref for LockedTransaction<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.store
    }
}

impl<S: RowStore + ?Sized> DerefMut for LockedTransaction<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.store
    }
}

impl<S: RowStore + ?Sized> Drop for LockedTransaction<'_, S> {
    fn drop(&mut self) {
        if self.state == TransactionState::Active {
            tracing::warn!(table = %self.table, "transaction dropped while active, rolling back");
            self.abort();
        }
    }
}

/// Run `f` inside a locked transaction on `table`.
///
/// Commits when `f` succeeds. When `f` fails the transaction is rolled back
/// and `f`'s error is returned unchanged; a failing rollback is only logged.
pub fn run_locked<S, T, E, F>(store: &mut S, table: &str, f: F) -> Result<T, E>
where
    S: RowStore + ?Sized,
    E: From<StoreError>,
    F: FnOnce(&mut LockedTransaction<'_, S>) -> Result<T, E>,
{
    let mut txn = LockedTransaction::begin(store, table)?;
    match f(&mut txn) {
        Ok(value) => {
            txn.commit()?;
            Ok(value)
        }
        Err(e) => {
            tracing::debug!(table, "mutation failed, rolling back");
            if let Err(rollback_err) = txn.rollback() {
                tracing::warn!(table, error = %rollback_err, "rollback failed");
            }
            Err(e)
        }
    }
}
