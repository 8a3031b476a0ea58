//! nestset core types
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Identity types (NodeKey, TreeId)
//! - Value types (the tagged Value enum and the Attributes side map)
//! - The typed Node record materialized from a table row

mod entity;
mod id;
mod value;

pub use entity::*;
pub use id::*;
pub use value::*;
