//! Arena-backed tree of scan entries

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::mem;

/// Handle to a node inside a [`Tree`].
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One line of scan output: a file or directory and its size.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    size: u64,
    parent: Option<NodeId>,
    /// Newest child first, until a sort reorders them.
    children: VecDeque<NodeId>,
    depth: usize,
    open: bool,
}

impl Node {
    /// Path fragment as it appeared in the input, e.g. `/src` for a child or
    /// `/home/user` for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeId> + ExactSizeIterator + '_ {
        self.children.iter().copied()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Name for display: leading separator dropped, trailing one added to directories.
    pub fn display_name(&self) -> String {
        let bare = self.name.strip_prefix('/').unwrap_or(&self.name);
        if self.has_children() {
            format!("{}/", bare)
        } else {
            bare.to_string()
        }
    }
}

/// A strict tree owning all of its nodes.
///
/// Nodes are created through [`Tree::new`] and [`Tree::add_child`] only and are
/// never removed, so every `NodeId` handed out stays valid for the life of the tree.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree holding only a root. The root starts open.
    pub fn new(root_name: impl Into<String>, root_size: u64) -> Self {
        Self {
            nodes: vec![Node {
                name: root_name.into(),
                size: root_size,
                parent: None,
                children: VecDeque::new(),
                depth: 0,
                open: true,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// All node ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Create a node under `parent`, ahead of its existing children.
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>, size: u64) -> NodeId {
        let id = NodeId(self.nodes.len());
        let depth = self.nodes[parent.0].depth + 1;
        self.nodes.push(Node {
            name: name.into(),
            size,
            parent: Some(parent),
            children: VecDeque::new(),
            depth,
            open: false,
        });
        self.nodes[parent.0].children.push_front(id);
        id
    }

    pub fn set_open(&mut self, id: NodeId, open: bool) {
        self.nodes[id.0].open = open;
    }

    /// Walk from `id` up to the root, `id` first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&cur| self.nodes[cur.0].parent)
    }

    /// Names from the root down to `id`, concatenated as-is.
    pub fn full_name(&self, id: NodeId) -> String {
        let mut chain: Vec<&str> = self
            .ancestors(id)
            .map(|a| self.nodes[a.0].name.as_str())
            .collect();
        chain.reverse();
        chain.concat()
    }

    /// Reorder the children of `id`. The sort is stable.
    pub fn sort_children_by<F>(&mut self, id: NodeId, mut compare: F)
    where
        F: FnMut(&Node, &Node) -> Ordering,
    {
        let mut children = mem::take(&mut self.nodes[id.0].children);
        children
            .make_contiguous()
            .sort_by(|a, b| compare(&self.nodes[a.0], &self.nodes[b.0]));
        self.nodes[id.0].children = children;
    }
}
