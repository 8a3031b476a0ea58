//! The typed record for one row of a nested-set table.

use crate::{Attributes, NodeKey, TreeId, Value};

/// A node of a nested-set tree.
///
/// The structural columns are explicit fields; every other column of the row
/// lands in `attributes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Store-assigned primary key.
    pub key: NodeKey,
    /// Owning node, `None` for a root.
    pub parent: Option<NodeKey>,
    /// Left bound of the interval.
    pub left: i64,
    /// Right bound of the interval.
    pub right: i64,
    /// Partition, present only when the schema declares a tree column.
    pub tree: Option<TreeId>,
    /// Remaining columns.
    pub attributes: Attributes,
}

impl Node {
    /// Create a node without extra attributes.
    pub fn new(key: NodeKey, parent: Option<NodeKey>, left: i64, right: i64) -> Self {
        Self {
            key,
            parent,
            left,
            right,
            tree: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_tree(mut self, tree: TreeId) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Returns true if the node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns true if the node has no descendants.
    pub fn is_leaf(&self) -> bool {
        self.right == self.left + 1
    }

    /// Number of integer units the interval occupies, including the node itself.
    pub fn width(&self) -> i64 {
        self.right - self.left + 1
    }

    /// Number of descendants encoded by the interval.
    pub fn descendant_count(&self) -> i64 {
        (self.right - self.left - 1) / 2
    }

    /// Returns true if `other` lies strictly inside this node's interval.
    ///
    /// Partitions are compared too: nodes of different trees never contain
    /// each other.
    pub fn contains(&self, other: &Node) -> bool {
        self.tree == other.tree && self.left < other.left && other.right < self.right
    }

    /// Get an attribute value by column name.
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}
