//! Structural invariant checks over a whole table.
//!
//! Each partition is checked on its own:
//! - every interval has `left < right`
//! - the bounds of a partition with `n` nodes are exactly `1..=2n`
//! - two intervals are either disjoint or strictly nested
//! - a node's parent is the smallest interval containing it, and a node
//!   contained by nothing has no parent

use std::collections::BTreeMap;

use nestset_core::{Node, NodeKey, TreeId};
use thiserror::Error;

/// One broken invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{key} has inverted bounds [{left}, {right}]")]
    InvertedBounds { key: NodeKey, left: i64, right: i64 },

    #[error("bounds of {tree:?} are not 1..={expected}: found {found:?}")]
    NotDense {
        tree: Option<TreeId>,
        expected: i64,
        found: Vec<i64>,
    },

    #[error("{a} and {b} overlap without nesting")]
    Overlap { a: NodeKey, b: NodeKey },

    #[error("{key} has parent {actual:?}, containment says {expected:?}")]
    WrongParent {
        key: NodeKey,
        expected: Option<NodeKey>,
        actual: Option<NodeKey>,
    },
}

/// Check every invariant. An empty result means the table is valid.
pub fn check_invariants(nodes: &[Node]) -> Vec<Violation> {
    let mut partitions: BTreeMap<Option<TreeId>, Vec<&Node>> = BTreeMap::new();
    for node in nodes {
        partitions.entry(node.tree).or_default().push(node);
    }

    let mut violations = Vec::new();
    for (tree, mut members) in partitions {
        members.sort_by_key(|n| n.left);
        check_bounds(tree, &members, &mut violations);
        check_nesting(&members, &mut violations);
    }
    violations
}

fn check_bounds(tree: Option<TreeId>, members: &[&Node], violations: &mut Vec<Violation>) {
    let mut bounds = Vec::with_capacity(members.len() * 2);
    for node in members {
        if node.left >= node.right {
            violations.push(Violation::InvertedBounds {
                key: node.key,
                left: node.left,
                right: node.right,
            });
        }
        bounds.push(node.left);
        bounds.push(node.right);
    }
    bounds.sort_unstable();

    let dense = bounds
        .iter()
        .enumerate()
        .all(|(i, &value)| value == i as i64 + 1);
    if !dense {
        violations.push(Violation::NotDense {
            tree,
            expected: bounds.len() as i64,
            found: bounds,
        });
    }
}

/// `members` must be sorted by left bound.
fn check_nesting(members: &[&Node], violations: &mut Vec<Violation>) {
    let mut open: Vec<&Node> = Vec::new();
    for node in members {
        while open.last().is_some_and(|top| top.right < node.left) {
            open.pop();
        }
        if let Some(top) = open.last() {
            if node.right > top.right {
                violations.push(Violation::Overlap {
                    a: top.key,
                    b: node.key,
                });
            }
        }

        let expected = open.last().map(|top| top.key);
        if node.parent != expected {
            violations.push(Violation::WrongParent {
                key: node.key,
                expected,
                actual: node.parent,
            });
        }
        open.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(key: i64, parent: Option<i64>, left: i64, right: i64) -> Node {
        Node::new(NodeKey::new(key), parent.map(NodeKey::new), left, right)
    }

    #[test]
    fn test_valid_tree() {
        // GIVEN R [1,8] > (B [2,3], A [4,5], C [6,7])
        let nodes = vec![
            node(1, None, 1, 8),
            node(3, Some(1), 2, 3),
            node(2, Some(1), 4, 5),
            node(4, Some(1), 6, 7),
        ];

        // THEN
        assert!(check_invariants(&nodes).is_empty());
    }

    #[test]
    fn test_partitions_checked_separately() {
        let nodes = vec![
            node(1, None, 1, 2).with_tree(TreeId::new(1)),
            node(2, None, 1, 4).with_tree(TreeId::new(2)),
            node(3, Some(2), 2, 3).with_tree(TreeId::new(2)),
        ];

        assert!(check_invariants(&nodes).is_empty());
    }

    #[test]
    fn test_gap_detected() {
        let nodes = vec![node(1, None, 1, 6), node(2, Some(1), 2, 3)];

        let violations = check_invariants(&nodes);

        assert!(matches!(violations.as_slice(), [Violation::NotDense { .. }]));
    }

    #[test]
    fn test_overlap_detected() {
        let nodes = vec![
            node(1, None, 1, 8),
            node(2, Some(1), 2, 5),
            node(3, Some(1), 4, 7),
            node(4, Some(1), 3, 6),
        ];

        let violations = check_invariants(&nodes);

        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::Overlap { .. })));
    }

    #[test]
    fn test_stale_parent_detected() {
        // grandchild still pointing at the root
        let nodes = vec![
            node(1, None, 1, 6),
            node(2, Some(1), 2, 5),
            node(3, Some(1), 3, 4),
        ];

        let violations = check_invariants(&nodes);

        assert_eq!(
            violations,
            vec![Violation::WrongParent {
                key: NodeKey::new(3),
                expected: Some(NodeKey::new(2)),
                actual: Some(NodeKey::new(1)),
            }]
        );
    }

    #[test]
    fn test_inverted_bounds_detected() {
        let nodes = vec![node(1, None, 2, 1)];

        let violations = check_invariants(&nodes);

        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::InvertedBounds { .. })));
    }
}
