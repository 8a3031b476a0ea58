//! Nesting flat node lists.

use std::collections::{HashMap, HashSet};

use nestset_core::{Node, NodeKey};

/// A node together with its nested children.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub node: Node,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn key(&self) -> NodeKey {
        self.node.key
    }

    /// Number of nodes in this branch, including itself.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }

    /// Depth-first search for `key` in this branch.
    pub fn find(&self, key: NodeKey) -> Option<&TreeNode> {
        if self.key() == key {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(key))
    }
}

/// Nest `nodes` by parent key.
///
/// Children keep left-bound order. A node whose parent is not in the list
/// becomes a top-level entry, so any slice of a table (a subtree, a query
/// result) nests without losing nodes.
pub fn build_forest(mut nodes: Vec<Node>) -> Vec<TreeNode> {
    nodes.sort_by_key(|n| (n.tree, n.left));

    let present: HashSet<NodeKey> = nodes.iter().map(|n| n.key).collect();
    let mut by_parent: HashMap<NodeKey, Vec<Node>> = HashMap::new();
    let mut top = Vec::new();
    for node in nodes {
        match node.parent {
            Some(parent) if parent != node.key && present.contains(&parent) => {
                by_parent.entry(parent).or_default().push(node)
            }
            _ => top.push(node),
        }
    }

    top.into_iter()
        .map(|node| attach(node, &mut by_parent))
        .collect()
}

fn attach(node: Node, by_parent: &mut HashMap<NodeKey, Vec<Node>>) -> TreeNode {
    let children = by_parent
        .remove(&node.key)
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach(child, by_parent))
        .collect();
    TreeNode { node, children }
}
