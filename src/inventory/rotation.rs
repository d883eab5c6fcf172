//! Rotation primitives.
//!
//! Single left/right rotations over owned subtrees, the [`RotationEvent`]
//! emitted before each one, and the [`RotationObserver`] hook that receives
//! those events.

use super::node::{Link, Node};
use std::fmt;
use tracing::trace;

/// Direction of a single rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationKind {
    /// The left child is promoted over its parent.
    RotateRight,
    /// The right child is promoted over its parent.
    RotateLeft,
}

impl fmt::Display for RotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationKind::RotateRight => f.write_str("rotate right"),
            RotationKind::RotateLeft => f.write_str("rotate left"),
        }
    }
}

/// Notification emitted right before a rotation rewires pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationEvent {
    /// Direction of the rotation.
    pub kind: RotationKind,
    /// Key of the subtree root before the rotation.
    pub outer_key: i64,
    /// Key of the child that becomes the new subtree root.
    pub inner_key: i64,
}

/// A rebalancing step taken during deletion, reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebalanceAction {
    /// Direction of the rotation.
    pub kind: RotationKind,
    /// Key of the node the rotation was applied at.
    pub key: i64,
}

impl fmt::Display for RebalanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at node {}", self.kind, self.key)
    }
}

impl From<RotationEvent> for RebalanceAction {
    fn from(event: RotationEvent) -> Self {
        Self {
            kind: event.kind,
            key: event.outer_key,
        }
    }
}

/// Receiver for rotation notifications.
///
/// Called synchronously, in-line with the mutation that triggers it. The
/// observer never gets access to the tree, so it cannot re-enter it.
/// Any `FnMut(RotationKind, i64, i64)` closure is an observer.
pub trait RotationObserver {
    /// Handles one rotation about to happen.
    fn on_rotation(&mut self, event: RotationEvent);
}

impl<F> RotationObserver for F
where
    F: FnMut(RotationKind, i64, i64),
{
    fn on_rotation(&mut self, event: RotationEvent) {
        self(event.kind, event.outer_key, event.inner_key);
    }
}

/// Collects the events of a single mutation and forwards them to the
/// optional observer as they happen.
pub(crate) struct RotationLog<'a> {
    observer: Option<&'a mut (dyn RotationObserver + 'static)>,
    events: Vec<RotationEvent>,
}

impl<'a> RotationLog<'a> {
    pub(crate) fn new(observer: Option<&'a mut (dyn RotationObserver + 'static)>) -> Self {
        Self {
            observer,
            events: Vec::new(),
        }
    }

    fn emit(&mut self, event: RotationEvent) {
        trace!(kind = %event.kind, outer = event.outer_key, inner = event.inner_key, "rotation");
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_rotation(event);
        }
        self.events.push(event);
    }

    pub(crate) fn into_events(self) -> Vec<RotationEvent> {
        self.events
    }
}

/// Rotates the subtree rooted at `y` to the right and returns the new root.
///
/// `y` must have a left child.
pub(crate) fn rotate_right(mut y: Box<Node>, log: &mut RotationLog<'_>) -> Box<Node> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    log.emit(RotationEvent {
        kind: RotationKind::RotateRight,
        outer_key: y.key(),
        inner_key: x.key(),
    });

    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

/// Rotates the subtree rooted at `x` to the left and returns the new root.
///
/// `x` must have a right child.
pub(crate) fn rotate_left(mut x: Box<Node>, log: &mut RotationLog<'_>) -> Box<Node> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    log.emit(RotationEvent {
        kind: RotationKind::RotateLeft,
        outer_key: x.key(),
        inner_key: y.key(),
    });

    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Applies `rotate` to the child held in `slot`, if any.
pub(crate) fn rotate_child(
    slot: &mut Link,
    log: &mut RotationLog<'_>,
    rotate: fn(Box<Node>, &mut RotationLog<'_>) -> Box<Node>,
) {
    if let Some(child) = slot.take() {
        *slot = Some(rotate(child, log));
    }
}
