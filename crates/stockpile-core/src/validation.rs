//! # Validation Module
//!
//! Input validation for product records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Types (serde)                                                │
//! │  ├── status must be one of the three labels                            │
//! │  └── quantity must be a non-negative integer                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── name / category / supplier must not be blank                      │
//! │  └── ids must be unique across a bulk payload                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: ProductStore                                                 │
//! │  └── runs these checks before touching memory or storage               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockpile_core::validation::validate_required;
//!
//! assert!(validate_required("name", "Gaming Chair").is_ok());
//! assert!(validate_required("name", "   ").is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{Product, ProductDraft};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a required text field is not blank.
///
/// Whitespace-only input counts as blank, the same as an untouched form field.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates an add-form payload.
///
/// ## Rules
/// - name, category and supplier must be non-blank
/// - quantity and status are already constrained by their types
pub fn validate_draft(draft: &ProductDraft) -> ValidationResult<()> {
    validate_required("name", &draft.name)?;
    validate_required("category", &draft.category)?;
    validate_required("supplier", &draft.supplier)?;
    Ok(())
}

/// Validates a complete product record.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_required("name", &product.name)?;
    validate_required("category", &product.category)?;
    validate_required("supplier", &product.supplier)?;
    Ok(())
}

/// Validates a whole collection before it replaces the current one.
///
/// ## Rules
/// - every record passes [`validate_product`]
/// - no two records share an id
///
/// The first failure is reported with the index of the offending record.
pub fn validate_collection(products: &[Product]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(products.len());

    for (index, product) in products.iter().enumerate() {
        validate_product(product).map_err(|e| e.at_record(index))?;

        if !seen.insert(product.id) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: product.id.to_string(),
            }
            .at_record(index));
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
