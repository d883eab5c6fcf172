//! Tree node module.
//!
//! A [`Node`] owns its [`Record`] and, exclusively, its two children. There
//! are no parent pointers: every algorithm walks top-down and hands owned
//! subtrees back up the recursion.

use super::record::Record;

/// An owned, possibly empty subtree.
pub(crate) type Link = Option<Box<Node>>;

/// A node of the AVL tree.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) record: Record,
    pub(crate) height: i32,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl Node {
    /// Creates a leaf holding `record`.
    pub(crate) fn new(record: Record) -> Self {
        Self {
            record,
            height: 1,
            left: None,
            right: None,
        }
    }

    pub(crate) const fn key(&self) -> i64 {
        self.record.key
    }

    /// Recomputes this node's height from its children.
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// `height(left) - height(right)`.
    pub(crate) fn balance(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

/// Height of a subtree; 0 when empty.
pub(crate) fn height(link: &Link) -> i32 {
    link.as_ref().map_or(0, |node| node.height)
}

/// Balance factor of a subtree; 0 when empty.
pub(crate) fn balance(link: &Link) -> i32 {
    link.as_ref().map_or(0, |node| node.balance())
}

/// A read-only description of one node, used to render the tree shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    /// Key of the node.
    pub key: i64,
    /// Stored height of the node.
    pub height: i32,
    /// Distance from the root (the root has depth 0).
    pub depth: usize,
    /// Key of the left child, if any.
    pub left: Option<i64>,
    /// Key of the right child, if any.
    pub right: Option<i64>,
}

impl NodeView {
    pub(crate) fn of(node: &Node, depth: usize) -> Self {
        Self {
            key: node.key(),
            height: node.height,
            depth,
            left: node.left.as_ref().map(|n| n.key()),
            right: node.right.as_ref().map(|n| n.key()),
        }
    }

    /// Returns true if the node has no children.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
