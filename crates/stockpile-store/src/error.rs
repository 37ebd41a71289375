//! # Store Error Types
//!
//! Error types for storage and product store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PersistenceError ← Adds the storage key involved                      │
//! │       │                                                                 │
//! │       ├── on read:  fall back to defaults (never reaches the caller)   │
//! │       └── on write: kept as a pending warning, memory stays correct    │
//! │                                                                         │
//! │  ValidationError / unknown id                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ──► ApiError (board app) ──► notification    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;

use stockpile_core::ValidationError;
use thiserror::Error;

/// Storage backend failures.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the underlying file failed.
    ///
    /// ## When This Occurs
    /// - Data directory is read-only or was removed
    /// - Disk full
    #[error("storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    /// A value could not be encoded as JSON.
    #[error("could not encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The stored value is not what the key should hold.
    ///
    /// ## When This Occurs
    /// - The file was edited by hand
    /// - A write was interrupted by an older version without atomic rename
    #[error("stored value for '{key}' is unreadable: {reason}")]
    Corrupt { key: String, reason: String },

    /// The backend refused the operation (quota, simulated outage).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl PersistenceError {
    /// Creates an Io error for a given key.
    pub fn io(key: impl Into<String>, source: io::Error) -> Self {
        PersistenceError::Io {
            key: key.into(),
            source,
        }
    }

    /// Creates a Corrupt error for a given key.
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        PersistenceError::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Product store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No product with this id.
    #[error("Product not found: {id}")]
    NotFound { id: i64 },

    /// Input rejected before anything changed.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// An explicit flush could not reach storage.
    #[error("{0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type for storage backend operations.
pub type PersistResult<T> = Result<T, PersistenceError>;

/// Result type for product store operations.
pub type StoreResult<T> = Result<T, StoreError>;
