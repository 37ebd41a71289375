//! # Error Types
//!
//! Domain-specific error types for stockpile-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockpile-core errors (this file)                                     │
//! │  ├── ValidationError  - Field and record validation failures           │
//! │  └── ImportError      - Unreadable or mis-shaped import documents      │
//! │                                                                         │
//! │  stockpile-store errors (separate crate)                               │
//! │  ├── PersistenceError - Storage read/write failures                    │
//! │  └── StoreError       - What ProductStore operations return            │
//! │                                                                         │
//! │  board app errors                                                      │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError / ImportError → ApiError → UI       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the add/edit form path and by bulk replacement before anything
/// is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., two records sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A record inside a bulk payload failed validation.
    #[error("record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Attaches the position of the offending record in a bulk payload.
    pub fn at_record(self, index: usize) -> Self {
        ValidationError::Record {
            index,
            source: Box::new(self),
        }
    }
}

// =============================================================================
// Import Error
// =============================================================================

/// Import document errors.
///
/// ## User Workflow
/// ```text
/// Choose file ──► read text ──► parse ──► shape check ──► replaceAll
///                                 │            │
///                                 ▼            ▼
///                           Malformed    NotAnArray / InvalidRecord
///                                 │            │
///                                 └─────┬──────┘
///                                       ▼
///                     "Invalid file" notice, inventory unchanged
/// ```
#[derive(Debug, Error)]
pub enum ImportError {
    /// Text is not JSON at all.
    #[error("file is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    /// JSON, but the top level is not an array.
    #[error("expected a JSON array of products, found {found}")]
    NotAnArray { found: &'static str },

    /// An element does not have the Product shape.
    #[error("product {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// Every element is well-formed but the set as a whole is not.
    #[error("{0}")]
    Rejected(#[from] ValidationError),
}

// =============================================================================
// Unit Tests
// =============================================================================
