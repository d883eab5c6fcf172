//! # AVL Inventory - Balanced Index for Inventory Records
//!
//! A Rust library that keeps an inventory of products ordered by a unique
//! integer key in a height-balanced (AVL) binary search tree, with price and
//! category queries, rotation notifications for visual front ends, and JSON
//! snapshot persistence.
//!
//! ## Key Features
//!
//! - **Guaranteed Balance**: Every insert and delete restores BST order, the
//!   AVL balance condition and stored heights before returning.
//!
//! - **Observable Rotations**: A single [`inventory::RotationObserver`] is told
//!   about every rotation before it happens, and each mutation also returns the
//!   rotations it performed.
//!
//! - **Path-Reporting Queries**: Exact, price range, category and combined
//!   searches report the keys they visited, so a renderer can animate them.
//!
//! - **JSON Snapshots**: Load and save the whole inventory as an indented JSON
//!   array, with an optional policy that rewrites the snapshot after every
//!   mutation.
//!
//! - **Result-Based Error Handling**: All fallible operations return
//!   `Result<T, Error>` with descriptive error types.
//!
//! ## Architecture
//!
//! ```text
//! InventoryEngine (config: snapshot target + persistence policy)
//!   └── AvlTree (owning root, record count, rotation observer)
//!         └── Node (record, height, owned left/right children)
//! ```
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`inventory`] | Tree, queries, rotations, snapshots and the engine |
//! | [`config`] | Engine configuration and persistence policy |
//! | [`error`] | Error types and `Result` type alias |
//!
//! ## Example Usage
//!
//! ### Building and Querying an Inventory
//!
//! ```rust
//! use avl_inventory::inventory::{CombinedQuery, InventoryEngine};
//!
//! let mut engine = InventoryEngine::new();
//! engine.insert(30, "Licuadora", 3, 55.0, "Electrodomesticos").unwrap();
//! engine.insert(10, "Toalla", 0, 5.0, "Hogar").unwrap();
//! engine.insert(20, "Balon", 7, 9.0, "Deportes").unwrap();
//!
//! // Left-right case: rotate left at 10, then right at 30.
//! assert_eq!(engine.tree().root_key(), Some(20));
//!
//! let hogar = engine.search_by_category("Hogar").unwrap();
//! assert_eq!(hogar.keys(), vec![10]);
//!
//! let cheap = engine.combined_search(&CombinedQuery::new().with_max_price(10.0));
//! assert_eq!(cheap.keys(), vec![10, 20]);
//!
//! assert_eq!(engine.out_of_stock().len(), 1);
//! ```
//!
//! ### Persisting Snapshots
//!
//! ```rust,no_run
//! use avl_inventory::config::{EngineConfig, PersistPolicy};
//! use avl_inventory::inventory::InventoryEngine;
//!
//! let config = EngineConfig::new()
//!     .with_snapshot_path("inventory.json")
//!     .with_persist_policy(PersistPolicy::Manual);
//! let mut engine = InventoryEngine::with_config(config);
//!
//! engine.load("inventory.json").unwrap();
//! engine.insert(99, "Sarten", 2, 21.0, "Cocina").unwrap();
//! engine.save(None).unwrap();
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Insert / Delete / Lookup**: O(log N)
//! - **Price range / combined search**: O(log N + visited), pruned by price
//! - **Category search / out-of-stock scan / traversal**: O(N)
//! - **Snapshot save**: O(N); with `PersistPolicy::AfterEveryMutation` this is
//!   paid on every mutation
//!
//! ## Dependencies
//!
//! - **tracing** (0.1): Structured logging
//! - **serde** / **serde_json** (1.0): Snapshot and configuration encoding
//! - **thiserror** (2.0): Error handling

pub mod config;
pub mod error;
pub mod inventory;

pub use error::{Error, Result};
