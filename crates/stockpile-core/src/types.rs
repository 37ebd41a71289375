//! # Domain Types
//!
//! Core domain types used throughout Stockpile.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductDraft   │   │    Product      │   │  ProductStatus  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │──►│  id (i64)       │   │  In Stock       │       │
//! │  │  category       │   │  name           │   │  Low Stock      │       │
//! │  │  supplier       │   │  category       │   │  Out of Stock   │       │
//! │  │  quantity       │   │  supplier       │   └─────────────────┘       │
//! │  │  status?        │   │  quantity (u32) │                              │
//! │  └─────────────────┘   │  status         │   ┌─────────────────┐       │
//! │                        └────────▲────────┘   │  DropRequest    │       │
//! │  ┌─────────────────┐            │            │  ─────────────  │       │
//! │  │  ProductPatch   │────────────┘            │  source_id      │       │
//! │  │  (all optional) │                         │  target_status  │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Shape
//! The persisted and exported form uses the display strings for status, so a
//! stored record looks like:
//! ```json
//! { "id": 1, "name": "iPhone 15 Pro", "category": "Electronics",
//!   "quantity": 25, "supplier": "Apple Inc", "status": "In Stock" }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Product Status
// =============================================================================

/// Stock level classification of a product.
///
/// Each status is also one lane of the board.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum ProductStatus {
    /// Plenty on hand.
    #[default]
    #[serde(rename = "In Stock")]
    InStock,
    /// Running low, reorder soon.
    #[serde(rename = "Low Stock")]
    LowStock,
    /// Nothing on hand.
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl ProductStatus {
    /// All statuses in lane order (left to right on the board).
    pub const ALL: [ProductStatus; 3] = [
        ProductStatus::InStock,
        ProductStatus::LowStock,
        ProductStatus::OutOfStock,
    ];

    /// Display label, identical to the JSON form.
    pub const fn label(&self) -> &'static str {
        match self {
            ProductStatus::InStock => "In Stock",
            ProductStatus::LowStock => "Low Stock",
            ProductStatus::OutOfStock => "Out of Stock",
        }
    }

    /// Position of this status' lane on the board.
    pub const fn lane_index(&self) -> usize {
        match self {
            ProductStatus::InStock => 0,
            ProductStatus::LowStock => 1,
            ProductStatus::OutOfStock => 2,
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses either the display label (`"Low Stock"`) or a command-line
/// friendly spelling (`low-stock`, `low_stock`, `lowstock`), case-insensitively.
impl FromStr for ProductStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "instock" | "in" => Ok(ProductStatus::InStock),
            "lowstock" | "low" => Ok(ProductStatus::LowStock),
            "outofstock" | "out" => Ok(ProductStatus::OutOfStock),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: ProductStatus::ALL
                    .iter()
                    .map(|s| s.label().to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A tracked inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier, assigned at creation and never changed.
    #[ts(type = "number")]
    pub id: i64,

    /// Display name shown on the card.
    pub name: String,

    /// Free-form category (used by the category filter).
    pub category: String,

    /// Units on hand.
    pub quantity: u32,

    /// Free-form supplier (used by the supplier filter).
    pub supplier: String,

    /// Current lane.
    pub status: ProductStatus,
}

impl Product {
    /// Builds a product from a draft and an already-assigned id.
    pub fn from_draft(id: i64, draft: ProductDraft) -> Self {
        Product {
            id,
            name: draft.name,
            category: draft.category,
            quantity: draft.quantity,
            supplier: draft.supplier,
            status: draft.status.unwrap_or_default(),
        }
    }

    /// Returns a copy with the patch applied. The id is never touched.
    pub fn patched(&self, patch: &ProductPatch) -> Self {
        Product {
            id: self.id,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            category: patch
                .category
                .clone()
                .unwrap_or_else(|| self.category.clone()),
            quantity: patch.quantity.unwrap_or(self.quantity),
            supplier: patch
                .supplier
                .clone()
                .unwrap_or_else(|| self.supplier.clone()),
            status: patch.status.unwrap_or(self.status),
        }
    }
}

// =============================================================================
// Draft & Patch
// =============================================================================

/// Payload of the add form: a product without an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub supplier: String,
    #[serde(default)]
    pub quantity: u32,
    /// Defaults to `In Stock` when omitted.
    #[serde(default)]
    pub status: Option<ProductStatus>,
}

/// Payload of the edit form. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
}

impl ProductPatch {
    /// A patch that only moves the product to another lane.
    pub fn status(status: ProductStatus) -> Self {
        ProductPatch {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Checks if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.supplier.is_none()
            && self.quantity.is_none()
            && self.status.is_none()
    }
}

/// The edit form submits every field; treat it as a full replacement.
impl From<ProductDraft> for ProductPatch {
    fn from(draft: ProductDraft) -> Self {
        ProductPatch {
            name: Some(draft.name),
            category: Some(draft.category),
            supplier: Some(draft.supplier),
            quantity: Some(draft.quantity),
            status: draft.status,
        }
    }
}

// =============================================================================
// Drag & Drop
// =============================================================================

/// A card dropped onto a lane.
///
/// Whatever delivers it (pointer drag, keyboard, CLI) only has to produce
/// this message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DropRequest {
    #[ts(type = "number")]
    pub source_id: i64,
    pub target_status: ProductStatus,
}

impl DropRequest {
    pub fn new(source_id: i64, target_status: ProductStatus) -> Self {
        DropRequest {
            source_id,
            target_status,
        }
    }
}

/// How quantity reacts when a card changes lane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LaneQuantityRule {
    /// Quantity is left alone; only the status changes.
    #[default]
    Preserve,
    /// Moving into Out of Stock zeroes the quantity.
    ZeroOutOfStock,
}

impl LaneQuantityRule {
    /// Quantity a product should carry after moving to `target`.
    pub fn quantity_after_move(&self, current: u32, target: ProductStatus) -> u32 {
        match (self, target) {
            (LaneQuantityRule::ZeroOutOfStock, ProductStatus::OutOfStock) => 0,
            _ => current,
        }
    }

    /// Builds the patch that commits a move under this rule.
    pub fn move_patch(&self, product: &Product, target: ProductStatus) -> ProductPatch {
        let quantity = self.quantity_after_move(product.quantity, target);
        ProductPatch {
            status: Some(target),
            quantity: (quantity != product.quantity).then_some(quantity),
            ..Default::default()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: 7,
            name: "Coffee Maker".to_string(),
            category: "Appliances".to_string(),
            quantity: 15,
            supplier: "Breville".to_string(),
            status: ProductStatus::InStock,
        }
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&ProductStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"Out of Stock\"");

        let status: ProductStatus = serde_json::from_str("\"Low Stock\"").unwrap();
        assert_eq!(status, ProductStatus::LowStock);
    }

    #[test]
    fn test_status_rejects_unknown_label() {
        assert!(serde_json::from_str::<ProductStatus>("\"Discontinued\"").is_err());
        assert!(serde_json::from_str::<ProductStatus>("\"in stock\"").is_err());
    }

    #[test]
    fn test_status_from_str_accepts_cli_spellings() {
        assert_eq!("low-stock".parse::<ProductStatus>().unwrap(), ProductStatus::LowStock);
        assert_eq!("Out of Stock".parse::<ProductStatus>().unwrap(), ProductStatus::OutOfStock);
        assert_eq!("IN_STOCK".parse::<ProductStatus>().unwrap(), ProductStatus::InStock);
        assert!("sold".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn test_product_json_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["status"], "In Stock");
        assert_eq!(value["quantity"], 15);
    }

    #[test]
    fn test_negative_quantity_is_not_representable() {
        let json = r#"{"id":1,"name":"A","category":"B","quantity":-1,"supplier":"C","status":"In Stock"}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_from_draft_defaults_status() {
        let draft = ProductDraft {
            name: "Desk Lamp".to_string(),
            category: "Furniture".to_string(),
            supplier: "IKEA".to_string(),
            quantity: 4,
            status: None,
        };
        let product = Product::from_draft(42, draft);
        assert_eq!(product.id, 42);
        assert_eq!(product.status, ProductStatus::InStock);
    }

    #[test]
    fn test_patched_preserves_id_and_untouched_fields() {
        let patch = ProductPatch {
            quantity: Some(3),
            status: Some(ProductStatus::LowStock),
            ..Default::default()
        };
        let updated = sample().patched(&patch);
        assert_eq!(updated.id, 7);
        assert_eq!(updated.name, "Coffee Maker");
        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.status, ProductStatus::LowStock);
    }

    #[test]
    fn test_lane_quantity_rule() {
        let product = sample();

        let keep = LaneQuantityRule::Preserve.move_patch(&product, ProductStatus::OutOfStock);
        assert_eq!(keep, ProductPatch::status(ProductStatus::OutOfStock));

        let zero = LaneQuantityRule::ZeroOutOfStock.move_patch(&product, ProductStatus::OutOfStock);
        assert_eq!(zero.quantity, Some(0));

        let low = LaneQuantityRule::ZeroOutOfStock.move_patch(&product, ProductStatus::LowStock);
        assert_eq!(low.quantity, None);
    }
}
