//! Inventory engine module.
//!
//! This module provides [`InventoryEngine`], the entry point used by a
//! front end: it owns the [`AvlTree`], the rotation observer slot and the
//! snapshot configuration, and persists the tree after mutations when the
//! [`PersistPolicy`] asks for it.
//!
//! ## Persistence contract
//!
//! When a mutation will be persisted, the snapshot target is checked with
//! [`snapshot::check_writable`] before the tree is touched; an unwritable
//! target fails the call with `Error::Io` and leaves the tree unchanged.
//! Once the tree has changed the call succeeds. A write that still fails at
//! that point is logged and kept for [`InventoryEngine::take_persist_error`].
//!
//! ## Architecture
//!
//! ```text
//! InventoryEngine
//!   ├── EngineConfig (snapshot target, persistence policy)
//!   └── AvlTree
//!         ├── RotationObserver (optional)
//!         └── Node (root) ── Record
//! ```

use super::node::NodeView;
use super::query::{CombinedQuery, QueryResult, SearchResult};
use super::record::Record;
use super::rotation::{RebalanceAction, RotationEvent, RotationObserver};
use super::snapshot;
use super::tree::AvlTree;
use crate::config::{EngineConfig, PersistPolicy};
use crate::error::{Error, Result};
use std::fmt;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// An AVL-indexed inventory with snapshot persistence.
#[derive(Debug, Default)]
pub struct InventoryEngine {
    tree: AvlTree,
    config: EngineConfig,
    persist_error: Option<Error>,
}

impl InventoryEngine {
    /// Creates an empty engine with no snapshot target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty engine using `config`.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            tree: AvlTree::new(),
            config,
            persist_error: None,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns a read-only view of the underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &AvlTree {
        &self.tree
    }

    /// Sets the default snapshot target.
    pub fn set_snapshot_path(&mut self, path: impl Into<PathBuf>) {
        self.config.snapshot_path = Some(path.into());
    }

    /// Returns the default snapshot target.
    #[must_use]
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.config.snapshot_path.as_deref()
    }

    /// Sets the persistence policy.
    pub fn set_persist_policy(&mut self, persist: PersistPolicy) {
        self.config.persist = persist;
    }

    /// Registers the observer notified before every rotation.
    pub fn set_rotation_observer(&mut self, observer: impl RotationObserver + 'static) {
        self.tree.set_rotation_observer(observer);
    }

    /// Removes the rotation observer.
    pub fn clear_rotation_observer(&mut self) {
        self.tree.clear_rotation_observer();
    }

    /// Inserts a new product.
    ///
    /// Returns the rotations performed while rebalancing.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateKey` if `key` already exists, or `Error::Io`
    /// if the snapshot target is not writable. The tree is unchanged on error.
    pub fn insert(
        &mut self,
        key: i64,
        name: impl Into<String>,
        quantity: u32,
        price: f64,
        category: impl Into<String>,
    ) -> Result<Vec<RotationEvent>> {
        self.insert_record(Record::new(key, name, quantity, price, category))
    }

    /// Inserts a new record. See [`InventoryEngine::insert`].
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateKey` if the key already exists, or
    /// `Error::Io` if the snapshot target is not writable. The tree is
    /// unchanged on error.
    pub fn insert_record(&mut self, record: Record) -> Result<Vec<RotationEvent>> {
        if self.tree.contains(record.key) {
            warn!(key = record.key, "rejecting insert of duplicate key");
            return Err(Error::duplicate_key(record.key));
        }
        self.check_persist_target()?;
        let events = self.tree.insert(record)?;
        self.persist_after_mutation();
        Ok(events)
    }

    /// Deletes the product under `key`.
    ///
    /// Returns the rebalancing actions taken, in order. Deleting an absent
    /// key is a no-op and does not touch the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the snapshot target is not writable. The tree
    /// is unchanged on error.
    pub fn delete(&mut self, key: i64) -> Result<Vec<RebalanceAction>> {
        if !self.tree.contains(key) {
            return Ok(Vec::new());
        }
        self.check_persist_target()?;
        let actions = self.tree.delete(key);
        self.persist_after_mutation();
        Ok(actions)
    }

    /// Updates quantity and/or price of an existing product.
    ///
    /// Returns false, without touching the snapshot, if `key` is absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the snapshot target is not writable. The tree
    /// is unchanged on error.
    pub fn update_product(
        &mut self,
        key: i64,
        quantity: Option<u32>,
        price: Option<f64>,
    ) -> Result<bool> {
        if !self.tree.contains(key) {
            return Ok(false);
        }
        self.check_persist_target()?;
        self.tree.update_product(key, quantity, price);
        self.persist_after_mutation();
        Ok(true)
    }

    /// Looks up `key` and reports the path taken.
    #[must_use]
    pub fn search(&self, key: i64) -> SearchResult {
        self.tree.search(key)
    }

    /// Returns every product priced within `[min, max]`.
    #[must_use]
    pub fn search_by_price_range(&self, min: f64, max: f64) -> QueryResult {
        self.tree.search_by_price_range(min, max)
    }

    /// Returns every product of `category`, sorted by key.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCategory` for a category outside the fixed set.
    pub fn search_by_category(&self, category: &str) -> Result<QueryResult> {
        self.tree.search_by_category(category)
    }

    /// Returns every product matching all predicates of `query`.
    #[must_use]
    pub fn combined_search(&self, query: &CombinedQuery) -> QueryResult {
        self.tree.combined_search(query)
    }

    /// Returns every product with no units left, sorted by key.
    #[must_use]
    pub fn out_of_stock(&self) -> Vec<Record> {
        self.tree.out_of_stock()
    }

    /// Returns every product in ascending key order.
    #[must_use]
    pub fn in_order(&self) -> Vec<Record> {
        self.tree.in_order()
    }

    /// Returns a pre-order description of every node, for rendering.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeView> {
        self.tree.nodes()
    }

    /// Returns the number of products.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if there are no products.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Loads a snapshot file into the tree.
    ///
    /// Records are inserted in file order; a key already present, in the
    /// tree or earlier in the file, has its payload overwritten. Returns the
    /// number of records read.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read or the snapshot target
    /// is not writable, and `Error::MalformedSnapshot` if it is not a list of
    /// records. The tree is unchanged on error.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let records = snapshot::load_file(path.as_ref())?;
        self.apply_snapshot(records)
    }

    /// Loads a snapshot from `reader`. See [`InventoryEngine::load`].
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedSnapshot` if the input is not a list of
    /// records, or `Error::Io` if the snapshot target is not writable. The
    /// tree is unchanged on error.
    pub fn load_from_reader<R: Read>(&mut self, reader: R) -> Result<usize> {
        let records = snapshot::read_records(reader, "<reader>")?;
        self.apply_snapshot(records)
    }

    /// Writes the whole tree, in key order, to `destination` or to the
    /// configured default target. An explicit destination becomes the new
    /// default. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoDestinationConfigured` if neither is available, or
    /// `Error::Io` if writing fails.
    pub fn save(&mut self, destination: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = destination {
            self.config.snapshot_path = Some(path.to_path_buf());
        }
        let path = self
            .config
            .snapshot_path
            .clone()
            .ok_or(Error::NoDestinationConfigured)?;
        snapshot::save_file(&path, &self.tree.in_order())?;
        Ok(path)
    }

    /// Returns the error of the last automatic snapshot write that failed
    /// after its mutation had been applied, clearing it.
    pub fn take_persist_error(&mut self) -> Option<Error> {
        self.persist_error.take()
    }

    /// Writes the whole tree, in key order, to `writer`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if writing fails.
    pub fn save_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        snapshot::write_records(writer, &self.tree.in_order())
    }

    /// Returns summary statistics about the inventory.
    #[must_use]
    pub fn stats(&self) -> InventoryStats {
        let mut stats = InventoryStats {
            record_count: self.tree.len(),
            height: self.tree.height(),
            ..InventoryStats::default()
        };
        for record in self.tree.iter() {
            if record.is_out_of_stock() {
                stats.out_of_stock += 1;
            }
            stats.total_units += u64::from(record.quantity);
            stats.inventory_value += record.stock_value();
        }
        stats
    }

    fn apply_snapshot(&mut self, records: Vec<Record>) -> Result<usize> {
        self.check_persist_target()?;
        let count = records.len();
        for record in records {
            self.tree.upsert(record);
        }
        info!(records = count, len = self.tree.len(), "loaded snapshot");
        self.persist_after_mutation();
        Ok(count)
    }

    fn check_persist_target(&self) -> Result<()> {
        if !self.config.persists_on_mutation() {
            return Ok(());
        }
        match self.config.snapshot_path.as_deref() {
            Some(path) => snapshot::check_writable(path),
            None => Ok(()),
        }
    }

    fn persist_after_mutation(&mut self) {
        if !self.config.persists_on_mutation() {
            return;
        }
        match self.save(None) {
            Ok(path) => debug!(path = %path.display(), "persisted after mutation"),
            Err(e) => {
                warn!(error = %e, "snapshot write failed after mutation");
                self.persist_error = Some(e);
            }
        }
    }
}

/// Summary statistics about an inventory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryStats {
    /// Number of records.
    pub record_count: usize,
    /// Height of the tree.
    pub height: i32,
    /// Records with no units in stock.
    pub out_of_stock: usize,
    /// Sum of all quantities.
    pub total_units: u64,
    /// Sum of `quantity * price` over all records.
    pub inventory_value: f64,
}

impl fmt::Display for InventoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records, height {}, {} out of stock, {} units, value {:.2}",
            self.record_count,
            self.height,
            self.out_of_stock,
            self.total_units,
            self.inventory_value
        )
    }
}
