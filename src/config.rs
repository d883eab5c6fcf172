//! Engine configuration.
//!
//! [`EngineConfig`] holds the default snapshot target and the persistence
//! policy applied after mutations. It can be built in code or read from a
//! JSON file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// When the engine rewrites its snapshot target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistPolicy {
    /// Only explicit `save` calls write the snapshot.
    Manual,
    /// Every successful mutation rewrites the whole snapshot, which costs
    /// O(n) per insert, delete or update.
    #[default]
    AfterEveryMutation,
}

/// Configuration for an [`InventoryEngine`](crate::inventory::InventoryEngine).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default snapshot file used by `save` and automatic persistence.
    pub snapshot_path: Option<PathBuf>,
    /// Persistence policy.
    pub persist: PersistPolicy,
}

impl EngineConfig {
    /// Creates a configuration with no snapshot target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default snapshot target.
    #[must_use]
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Sets the persistence policy.
    #[must_use]
    pub const fn with_persist_policy(mut self, persist: PersistPolicy) -> Self {
        self.persist = persist;
        self
    }

    /// Reads a configuration from a JSON file. Missing fields take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::config(path, e))?;
        serde_json::from_str(&text).map_err(|e| Error::config(path, e))
    }

    /// Returns true if mutations should rewrite the snapshot target.
    #[must_use]
    pub fn persists_on_mutation(&self) -> bool {
        self.persist == PersistPolicy::AfterEveryMutation && self.snapshot_path.is_some()
    }
}
