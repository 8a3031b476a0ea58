//! Identity types for tree rows.
//!
//! Both identifiers are 64-bit signed integers because that is what the
//! relational store hands back:
//! - `NodeKey` is assigned by the store on insert and never reassigned
//! - `TreeId` is the discriminator value separating independent trees

use std::fmt;

/// Primary key of a row in the tracked table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub i64);

impl NodeKey {
    /// Create a new NodeKey from a raw value.
    pub fn new(key: i64) -> Self {
        Self(key)
    }

    /// Get the raw value.
    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i64> for NodeKey {
    fn from(key: i64) -> Self {
        NodeKey(key)
    }
}

/// Value of the tree discriminator column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(pub i64);

impl TreeId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tree{}", self.0)
    }
}

impl From<i64> for TreeId {
    fn from(id: i64) -> Self {
        TreeId(id)
    }
}
