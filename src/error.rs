//! Error types for the AVL inventory library.
//!
//! All fallible operations return [`Result<T>`], an alias over [`Error`].
//! Lookups and deletions of absent keys are not errors; they report an empty
//! result instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while operating on the inventory tree.
#[derive(Debug, Error)]
pub enum Error {
    /// An insert was attempted with a key that is already stored.
    #[error("duplicate key: {key} already exists in the tree")]
    DuplicateKey {
        /// The offending key.
        key: i64,
    },

    /// A category search used a value outside the fixed enumeration.
    #[error("invalid category '{category}': expected one of Hogar, Cocina, Electrodomesticos, Deportes")]
    InvalidCategory {
        /// The rejected category string.
        category: String,
    },

    /// A snapshot source could not be parsed into a list of flat records.
    #[error("malformed snapshot {source_name}: {reason}")]
    MalformedSnapshot {
        /// Where the snapshot came from (a path or `<reader>`).
        source_name: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// `save` was called without an explicit destination and no default target.
    #[error("no snapshot destination configured")]
    NoDestinationConfigured,

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration {path}: {reason}")]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Underlying file system failure while reading or writing a snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a `DuplicateKey` error.
    #[must_use]
    pub fn duplicate_key(key: i64) -> Self {
        Self::DuplicateKey { key }
    }

    /// Creates an `InvalidCategory` error.
    #[must_use]
    pub fn invalid_category(category: impl Into<String>) -> Self {
        Self::InvalidCategory {
            category: category.into(),
        }
    }

    /// Creates a `MalformedSnapshot` error.
    #[must_use]
    pub fn malformed_snapshot(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedSnapshot {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a `Config` error.
    #[must_use]
    pub fn config(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
