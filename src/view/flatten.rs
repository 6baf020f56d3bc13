//! Flattening the tree into the rows currently on screen

use std::cmp::Ordering;

use crate::tree::{Node, NodeId, Tree};

/// Field children are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Size,
    Name,
}

impl SortKey {
    /// Direction used when this key is first selected: largest first for
    /// sizes, alphabetical for names.
    pub fn default_descending(self) -> bool {
        matches!(self, SortKey::Size)
    }
}

/// A sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub descending: bool,
}

impl Sort {
    pub fn new(key: SortKey) -> Self {
        Self {
            key,
            descending: key.default_descending(),
        }
    }

    pub fn compare(&self, a: &Node, b: &Node) -> Ordering {
        let ord = match self.key {
            SortKey::Size => a.size().cmp(&b.size()),
            SortKey::Name => a.name().cmp(b.name()),
        };
        if self.descending { ord.reverse() } else { ord }
    }
}

/// List the visible nodes in display order.
///
/// When `sort` is given, the children of every visited node are reordered
/// first (stable, so equal keys keep their previous order). The walk is
/// pre-order from the root: a node is always listed, its children only if it
/// is open, and a child smaller than `threshold` is hidden along with its
/// whole subtree. The root is always at index 0.
pub fn flatten(tree: &mut Tree, sort: Option<Sort>, threshold: u64) -> Vec<NodeId> {
    let mut rows = Vec::new();
    let mut stack = vec![tree.root()];

    while let Some(id) = stack.pop() {
        rows.push(id);

        if let Some(sort) = sort {
            tree.sort_children_by(id, |a, b| sort.compare(a, b));
        }

        let node = tree.node(id);
        if node.is_open() {
            // Reversed so the first child is popped next
            stack.extend(
                node.children()
                    .rev()
                    .filter(|&child| tree.node(child).size() >= threshold),
            );
        }
    }

    rows
}
