//! # Import/Export Codec
//!
//! Converts the collection to and from the portable JSON document.
//!
//! ## Document Format
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "name": "iPhone 15 Pro",
//!     "category": "Electronics",
//!     "quantity": 25,
//!     "supplier": "Apple Inc",
//!     "status": "In Stock"
//!   }
//! ]
//! ```
//!
//! ## Import Checks
//! ```text
//! text ──► serde_json::Value ──► is array? ──► each element is a Product?
//!               │                    │                   │
//!               ▼                    ▼                   ▼
//!          Malformed            NotAnArray         InvalidRecord{index}
//!                                                        │
//!                           validate_collection ◄────────┘
//!                                   │
//!                                   ▼
//!                          Rejected(ValidationError)
//! ```
//! Import is all-or-nothing: either every element decodes and validates, or
//! an error comes back and the caller keeps its current collection.

use serde_json::Value;

use crate::error::ImportError;
use crate::types::Product;
use crate::validation::validate_collection;

/// Suggested filename for exported documents.
pub const DEFAULT_EXPORT_FILE: &str = "inventory.json";

/// Serializes the collection as a pretty-printed JSON array.
///
/// `Product` has only string, integer and enum fields, so serialization
/// cannot fail; the fallback is never taken in practice.
pub fn export_products(products: &[Product]) -> String {
    serde_json::to_string_pretty(products).unwrap_or_else(|_| String::from("[]"))
}

/// Parses an import document into a validated collection.
pub fn import_products(text: &str) -> Result<Vec<Product>, ImportError> {
    let document: Value = serde_json::from_str(text).map_err(ImportError::Malformed)?;

    let elements = match document {
        Value::Array(elements) => elements,
        other => {
            return Err(ImportError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    let products = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value::<Product>(element).map_err(|e| ImportError::InvalidRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    validate_collection(&products)?;
    Ok(products)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
