//! nestset Transaction
//!
//! Scoped exclusive-lock transactions for tree mutations.
//!
//! Responsibilities:
//! - Begin a transaction and take the table lock as one step
//! - Release the lock and commit on success
//! - Release the lock and roll back on every other exit path, including
//!   early returns and panics
//! - Surface the original failure, never a rollback error in its place

mod guard;

pub use guard::{run_locked, LockedTransaction, TransactionState};
