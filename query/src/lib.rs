//! nestset Query
//!
//! Read operations on a nested-set table.
//!
//! Responsibilities:
//! - Look up single nodes, parents, children and ancestors
//! - Read whole subtrees and leaf sets using interval containment
//! - Materialize rows into typed nodes
//! - Nest flat node lists into a forest

mod error;
mod executor;
mod hierarchy;
mod materialize;

pub use error::{QueryError, QueryResult};
pub use executor::QueryExecutor;
pub use hierarchy::{build_forest, TreeNode};
