//! # API Error Type
//!
//! Unified error type for board commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockpile                              │
//! │                                                                         │
//! │  Front end                    Rust Backend                              │
//! │  ─────────                    ────────────                              │
//! │                                                                         │
//! │  add_product(draft)                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  StoreError::Validation ──────────────┐                          │  │
//! │  │  StoreError::NotFound ────────────────┤                          │  │
//! │  │  ImportError (bad file) ──────────────┼──► ApiError ────────────►│  │
//! │  │  PersistenceError (flush, export) ────┘                          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Every failure leaves the board as it was; the front end shows a       │
//! │  transient notice built from `code` and `message`.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockpile_core::ImportError;
use stockpile_store::{PersistenceError, StoreError};

/// API error returned from board commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product id does not exist
    NotFound,

    /// Form input or record validation failed (required-field indication)
    ValidationError,

    /// Import file rejected ("invalid file" notice)
    InvalidFile,

    /// Storage could not be read or written
    StorageError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(id: i64) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("Product not found: {id}"))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::StorageError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => ApiError::not_found(id),
            StoreError::Validation(e) => ApiError::validation(e.to_string()),
            StoreError::Persistence(e) => e.into(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        tracing::error!("Storage failure: {}", err);
        ApiError::storage(err.to_string())
    }
}

/// Converts rejected import documents to API errors.
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::new(ErrorCode::InvalidFile, format!("Invalid file: {err}"))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use stockpile_core::ValidationError;

    #[test]
    fn test_store_errors_map_to_codes() {
        let err: ApiError = StoreError::NotFound { id: 9 }.into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 9");

        let err: ApiError = StoreError::Validation(ValidationError::required("name")).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_import_errors_are_invalid_file() {
        let err: ApiError = ImportError::NotAnArray { found: "string" }.into();
        assert_eq!(err.code, ErrorCode::InvalidFile);
        assert!(err.message.starts_with("Invalid file"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found(3)).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 3");
    }
}
