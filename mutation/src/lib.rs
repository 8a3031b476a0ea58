//! nestset Mutation
//!
//! Write operations on a nested-set table.
//!
//! Responsibilities:
//! - Create roots, first children, and next siblings
//! - Delete a single node (promoting its children) or a whole subtree
//! - Drop an entire partition
//! - Renumber every affected bound inside one locked transaction
//! - Return created keys and deletion summaries
//!
//! # Module Structure
//!
//! - `executor` - Main MutationExecutor that coordinates operations
//! - `ops/` - Individual operation implementations (create, delete, tree)
//! - `baseline` - Reading the target row's bounds under the lock
//! - `shift` - Gap opening and closing plans
//! - `payload` - Caller attribute validation and insert building
//! - `error` - Error types for mutation failures
//! - `result` - Result types for mutation outcomes

mod baseline;
mod error;
mod executor;
mod ops;
mod payload;
mod result;
mod shift;

pub use error::{MutationError, MutationResult};
pub use executor::MutationExecutor;
pub use result::DeleteOutcome;
