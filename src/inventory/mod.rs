//! Inventory index module.
//!
//! This module provides an AVL-balanced index of inventory records:
//!
//! ## Layers
//!
//! ```text
//! InventoryEngine (snapshot target, persistence policy)
//!   └── AvlTree (insert / upsert / delete / update, rebalancing)
//!         ├── rotations (rotate_left / rotate_right, RotationObserver)
//!         ├── queries (search, price range, category, combined, out of stock)
//!         └── Node (owned children, height) ── Record
//! ```
//!
//! ## Components
//!
//! - [`InventoryEngine`]: Front-end entry point with JSON snapshot persistence
//! - [`AvlTree`]: The height-balanced tree and its mutations
//! - [`Record`]: A single inventory entry
//! - [`Category`]: The fixed set of searchable categories
//! - [`RotationObserver`]: Hook notified before each rotation
//! - [`SearchResult`] / [`QueryResult`]: Query outcomes with visited paths
//! - [`NodeView`]: Read-only node description for rendering the tree
//!
//! ## Example
//!
//! ```rust
//! use avl_inventory::inventory::{InventoryEngine, RotationKind};
//!
//! let mut engine = InventoryEngine::new();
//! engine.insert(10, "Olla", 4, 15.0, "Cocina").unwrap();
//! engine.insert(20, "Silla", 2, 30.0, "Hogar").unwrap();
//! let events = engine.insert(30, "Raqueta", 0, 45.0, "Deportes").unwrap();
//!
//! assert_eq!(events[0].kind, RotationKind::RotateLeft);
//! assert_eq!(engine.tree().root_key(), Some(20));
//! assert_eq!(engine.search(30).path, vec![20, 30]);
//! ```

mod engine;
mod node;
mod query;
mod record;
mod rotation;
pub mod snapshot;
mod tree;

// Re-export all public types
pub use engine::{InventoryEngine, InventoryStats};
pub use node::NodeView;
pub use query::{CombinedQuery, Iter, QueryResult, SearchResult};
pub use record::{Category, Record};
pub use rotation::{RebalanceAction, RotationEvent, RotationKind, RotationObserver};
pub use tree::{AvlTree, InvariantViolation};
