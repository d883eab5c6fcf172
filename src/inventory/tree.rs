//! AVL tree module.
//!
//! This module provides [`AvlTree`], the owning tree of inventory records,
//! with key-ordered insertion, update-in-place, deletion with successor
//! promotion and the bottom-up rebalancing that follows each of them.
//!
//! ## Rebalancing
//!
//! ```text
//! insert: decided by the inserted key against the heavy child's key
//!   LL  key < left.key            -> rotate_right(node)
//!   RR  key > right.key           -> rotate_left(node)
//!   LR  key > left.key            -> rotate_left(left), rotate_right(node)
//!   RL  key < right.key           -> rotate_right(right), rotate_left(node)
//!
//! delete: decided by the heavy child's balance factor
//!   LL  balance(left)  >= 0       -> rotate_right(node)
//!   LR  balance(left)  <  0       -> rotate_left(left), rotate_right(node)
//!   RR  balance(right) <= 0       -> rotate_left(node)
//!   RL  balance(right) >  0       -> rotate_right(right), rotate_left(node)
//! ```

use super::node::{Link, Node, NodeView, balance as subtree_balance, height as subtree_height};
use super::record::Record;
use super::rotation::{
    RebalanceAction, RotationEvent, RotationLog, RotationObserver, rotate_child, rotate_left,
    rotate_right,
};
use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error as ThisError;
use tracing::{debug, warn};

/// Height-balanced binary search tree of inventory records keyed by `key`.
///
/// Mutations take `&mut self`; the tree is single-threaded and is not meant
/// to be shared across a mutation.
pub struct AvlTree {
    pub(crate) root: Link,
    len: usize,
    observer: Option<Box<dyn RotationObserver>>,
}

impl Default for AvlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("len", &self.len)
            .field("height", &self.height())
            .field("root_key", &self.root_key())
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}

impl AvlTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            observer: None,
        }
    }

    /// Registers the observer notified before every rotation, replacing any
    /// previous one.
    pub fn set_rotation_observer(&mut self, observer: impl RotationObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Removes the rotation observer.
    pub fn clear_rotation_observer(&mut self) {
        self.observer = None;
    }

    /// Returns the number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree (0 when empty).
    #[must_use]
    pub fn height(&self) -> i32 {
        subtree_height(&self.root)
    }

    /// Returns the key stored at the root.
    #[must_use]
    pub fn root_key(&self) -> Option<i64> {
        self.root.as_ref().map(|n| n.key())
    }

    /// Returns the record stored under `key`.
    #[must_use]
    pub fn get(&self, key: i64) -> Option<&Record> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.record),
            };
        }
        None
    }

    /// Returns true if `key` is stored in the tree.
    #[must_use]
    pub fn contains(&self, key: i64) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a new record.
    ///
    /// Returns the rotations performed while rebalancing, in order.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateKey` if the key is already stored; the tree
    /// is left untouched in that case.
    pub fn insert(&mut self, record: Record) -> Result<Vec<RotationEvent>> {
        if self.contains(record.key) {
            warn!(key = record.key, "rejecting insert of duplicate key");
            return Err(Error::duplicate_key(record.key));
        }
        Ok(self.upsert(record))
    }

    /// Inserts `record`, or overwrites the payload of the record already
    /// stored under its key without changing the tree shape.
    ///
    /// Returns the rotations performed while rebalancing, in order.
    pub fn upsert(&mut self, record: Record) -> Vec<RotationEvent> {
        let key = record.key;
        if !self.contains(key) {
            self.len += 1;
        }

        let mut log = RotationLog::new(self.observer.as_deref_mut());
        self.root = Some(insert_node(self.root.take(), record, &mut log));
        let events = log.into_events();

        debug!(key, rotations = events.len(), len = self.len, "upserted record");
        events
    }

    /// Updates quantity and/or price of the record under `key` in place.
    ///
    /// Returns false if the key is absent.
    pub fn update_product(&mut self, key: i64, quantity: Option<u32>, price: Option<f64>) -> bool {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(&node.key()) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => {
                    if let Some(quantity) = quantity {
                        node.record.quantity = quantity;
                    }
                    if let Some(price) = price {
                        node.record.price = price;
                    }
                    debug!(key, ?quantity, ?price, "updated product");
                    return true;
                }
            };
        }
        false
    }

    /// Deletes the record under `key`.
    ///
    /// Returns the rebalancing actions taken, in order. Deleting an absent
    /// key is a no-op that returns an empty list.
    pub fn delete(&mut self, key: i64) -> Vec<RebalanceAction> {
        if !self.contains(key) {
            debug!(key, "delete of absent key ignored");
            return Vec::new();
        }

        let mut log = RotationLog::new(self.observer.as_deref_mut());
        self.root = delete_node(self.root.take(), key, &mut log);
        self.len -= 1;

        let actions: Vec<RebalanceAction> = log
            .into_events()
            .into_iter()
            .map(RebalanceAction::from)
            .collect();
        debug!(key, rotations = actions.len(), len = self.len, "deleted record");
        actions
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns a pre-order description of every node, for rendering.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeView> {
        let mut views = Vec::with_capacity(self.len);
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 0));
        }
        while let Some((node, depth)) = stack.pop() {
            views.push(NodeView::of(node, depth));
            if let Some(right) = node.right.as_deref() {
                stack.push((right, depth + 1));
            }
            if let Some(left) = node.left.as_deref() {
                stack.push((left, depth + 1));
            }
        }
        views
    }

    /// Verifies BST order, AVL balance and stored heights over the whole tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantViolation> {
        let mut count = 0;
        check_subtree(&self.root, None, None, &mut count)?;
        if count != self.len {
            return Err(InvariantViolation::LengthMismatch {
                stored: self.len,
                counted: count,
            });
        }
        Ok(())
    }
}

/// A broken structural invariant reported by [`AvlTree::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum InvariantViolation {
    /// A key is outside the bounds imposed by its ancestors.
    #[error("key {key} breaks search order")]
    Order {
        /// Offending key.
        key: i64,
    },
    /// A node's subtrees differ in height by more than one.
    #[error("node {key} is unbalanced (balance factor {balance})")]
    Balance {
        /// Offending key.
        key: i64,
        /// Its balance factor.
        balance: i32,
    },
    /// A node's stored height does not match its children.
    #[error("node {key} stores height {stored}, expected {expected}")]
    Height {
        /// Offending key.
        key: i64,
        /// Stored height.
        stored: i32,
        /// Recomputed height.
        expected: i32,
    },
    /// The cached record count does not match the nodes in the tree.
    #[error("tree reports {stored} records but holds {counted}")]
    LengthMismatch {
        /// Cached count.
        stored: usize,
        /// Counted nodes.
        counted: usize,
    },
}

fn check_subtree(
    link: &Link,
    lower: Option<i64>,
    upper: Option<i64>,
    count: &mut usize,
) -> std::result::Result<i32, InvariantViolation> {
    let Some(node) = link else {
        return Ok(0);
    };
    let key = node.key();
    if lower.is_some_and(|lo| key <= lo) || upper.is_some_and(|hi| key >= hi) {
        return Err(InvariantViolation::Order { key });
    }
    *count += 1;

    let left = check_subtree(&node.left, lower, Some(key), count)?;
    let right = check_subtree(&node.right, Some(key), upper, count)?;

    let expected = 1 + left.max(right);
    if node.height != expected {
        return Err(InvariantViolation::Height {
            key,
            stored: node.height,
            expected,
        });
    }
    let balance = left - right;
    if balance.abs() > 1 {
        return Err(InvariantViolation::Balance { key, balance });
    }
    Ok(expected)
}

fn insert_node(link: Link, record: Record, log: &mut RotationLog<'_>) -> Box<Node> {
    let Some(mut node) = link else {
        return Box::new(Node::new(record));
    };

    let key = record.key;
    match key.cmp(&node.key()) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), record, log)),
        Ordering::Greater => node.right = Some(insert_node(node.right.take(), record, log)),
        Ordering::Equal => {
            node.record.overwrite_payload(record);
            return node;
        }
    }

    node.update_height();
    rebalance_after_insert(node, key, log)
}

fn rebalance_after_insert(mut node: Box<Node>, key: i64, log: &mut RotationLog<'_>) -> Box<Node> {
    let balance = node.balance();

    if balance > 1 {
        let left_key = node.left.as_ref().map_or(key, |n| n.key());
        if key < left_key {
            return rotate_right(node, log);
        }
        if key > left_key {
            rotate_child(&mut node.left, log, rotate_left);
            return rotate_right(node, log);
        }
    }

    if balance < -1 {
        let right_key = node.right.as_ref().map_or(key, |n| n.key());
        if key > right_key {
            return rotate_left(node, log);
        }
        if key < right_key {
            rotate_child(&mut node.right, log, rotate_right);
            return rotate_left(node, log);
        }
    }

    node
}

fn delete_node(link: Link, key: i64, log: &mut RotationLog<'_>) -> Link {
    let mut node = link?;

    match key.cmp(&node.key()) {
        Ordering::Less => node.left = delete_node(node.left.take(), key, log),
        Ordering::Greater => node.right = delete_node(node.right.take(), key, log),
        Ordering::Equal => {
            if node.left.is_none() {
                return node.right.take();
            }
            if node.right.is_none() {
                return node.left.take();
            }

            if let Some(successor) = leftmost(node.right.as_deref()).cloned() {
                let successor_key = successor.key;
                node.record = successor;
                node.right = delete_node(node.right.take(), successor_key, log);
            }
        }
    }

    node.update_height();
    Some(rebalance_after_delete(node, log))
}

fn rebalance_after_delete(mut node: Box<Node>, log: &mut RotationLog<'_>) -> Box<Node> {
    let balance = node.balance();

    if balance > 1 {
        if subtree_balance(&node.left) < 0 {
            rotate_child(&mut node.left, log, rotate_left);
        }
        return rotate_right(node, log);
    }

    if balance < -1 {
        if subtree_balance(&node.right) > 0 {
            rotate_child(&mut node.right, log, rotate_right);
        }
        return rotate_left(node, log);
    }

    node
}

fn leftmost(mut node: Option<&Node>) -> Option<&Record> {
    while let Some(current) = node {
        match current.left.as_deref() {
            Some(left) => node = Some(left),
            None => return Some(&current.record),
        }
    }
    None
}
