//! nestset Session
//!
//! One handle bundling a table's schema with the store it lives in.
//!
//! Responsibilities:
//! - Route writes to the mutation executor and reads to the query executor
//! - Open SQLite-backed tables from a path or a TOML schema document
//! - Offer node-relative conveniences (add a child or sibling to a node)

mod error;
mod session;

pub use error::{SessionError, SessionResult};
pub use session::NestedSet;
