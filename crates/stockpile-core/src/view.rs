//! # Board View
//!
//! Derives what the board shows from the collection and the current filters.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Derived View Pipeline                               │
//! │                                                                         │
//! │  collection ──► FilterCriteria::matches ──► filtered subsequence        │
//! │                 • name contains search (case-insensitive)               │
//! │                 • category == filter, or filter empty                   │
//! │                 • supplier == filter, or filter empty                   │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                 ┌──────────────┬──────────────┬──────────────┐          │
//! │                 │   In Stock   │  Low Stock   │ Out of Stock │          │
//! │                 │  (lane 0)    │  (lane 1)    │  (lane 2)    │          │
//! │                 └──────────────┴──────────────┴──────────────┘          │
//! │                 each lane keeps source order                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of its inputs; the same collection and
//! filters always produce the same view.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Product, ProductStatus};

// =============================================================================
// Filter Criteria
// =============================================================================

/// The search box and the two filter dropdowns.
///
/// Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub category_filter: String,
    #[serde(default)]
    pub supplier_filter: String,
}

impl FilterCriteria {
    /// Criteria that match every product.
    pub fn none() -> Self {
        FilterCriteria::default()
    }

    /// Criteria with only a search term.
    pub fn search(text: impl Into<String>) -> Self {
        FilterCriteria {
            search_text: text.into(),
            ..Default::default()
        }
    }

    /// Checks if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty()
            && self.category_filter.is_empty()
            && self.supplier_filter.is_empty()
    }

    /// Checks a single product against all three predicates.
    pub fn matches(&self, product: &Product) -> bool {
        let name_matches = self.search_text.is_empty()
            || product
                .name
                .to_lowercase()
                .contains(&self.search_text.to_lowercase());

        name_matches
            && (self.category_filter.is_empty() || product.category == self.category_filter)
            && (self.supplier_filter.is_empty() || product.supplier == self.supplier_filter)
    }
}

// =============================================================================
// View Types
// =============================================================================

/// One status column of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Lane {
    pub status: ProductStatus,
    pub products: Vec<Product>,
}

/// The three lanes, always in In Stock / Low Stock / Out of Stock order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BoardView {
    pub lanes: Vec<Lane>,
}

impl BoardView {
    /// Returns the lane for a status.
    pub fn lane(&self, status: ProductStatus) -> &[Product] {
        self.lanes
            .iter()
            .find(|lane| lane.status == status)
            .map(|lane| lane.products.as_slice())
            .unwrap_or_default()
    }

    /// Total number of visible cards.
    pub fn len(&self) -> usize {
        self.lanes.iter().map(|lane| lane.products.len()).sum()
    }

    /// Checks if no card is visible.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-lane card counts for the lane headers.
    pub fn summary(&self) -> InventorySummary {
        let mut summary = InventorySummary::default();
        for lane in &self.lanes {
            summary.add(lane.status, lane.products.len());
        }
        summary
    }
}

/// Card counts per lane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventorySummary {
    pub total: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl InventorySummary {
    fn add(&mut self, status: ProductStatus, count: usize) {
        self.total += count;
        match status {
            ProductStatus::InStock => self.in_stock += count,
            ProductStatus::LowStock => self.low_stock += count,
            ProductStatus::OutOfStock => self.out_of_stock += count,
        }
    }

    /// Count for a single status.
    pub fn count(&self, status: ProductStatus) -> usize {
        match status {
            ProductStatus::InStock => self.in_stock,
            ProductStatus::LowStock => self.low_stock,
            ProductStatus::OutOfStock => self.out_of_stock,
        }
    }
}

// =============================================================================
// Derivations
// =============================================================================

/// Returns the products matching the filters, in collection order.
pub fn filter_products(products: &[Product], filters: &FilterCriteria) -> Vec<Product> {
    products
        .iter()
        .filter(|p| filters.matches(p))
        .cloned()
        .collect()
}

/// Computes the grouped board view.
pub fn compute_view(products: &[Product], filters: &FilterCriteria) -> BoardView {
    let mut lanes: Vec<Lane> = ProductStatus::ALL
        .iter()
        .map(|&status| Lane {
            status,
            products: Vec::new(),
        })
        .collect();

    for product in products.iter().filter(|p| filters.matches(p)) {
        if let Some(lane) = lanes.get_mut(product.status.lane_index()) {
            lane.products.push(product.clone());
        }
    }

    BoardView { lanes }
}

/// Lane totals over the whole collection, ignoring filters.
pub fn summarize(products: &[Product]) -> InventorySummary {
    let mut summary = InventorySummary::default();
    for product in products {
        summary.add(product.status, 1);
    }
    summary
}

/// Distinct categories in order of first appearance.
pub fn categories(products: &[Product]) -> Vec<String> {
    distinct(products.iter().map(|p| p.category.as_str()))
}

/// Distinct suppliers in order of first appearance.
pub fn suppliers(products: &[Product]) -> Vec<String> {
    distinct(products.iter().map(|p| p.supplier.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_products;
    use proptest::prelude::*;

    fn product(
        id: i64,
        name: &str,
        category: &str,
        supplier: &str,
        status: ProductStatus,
    ) -> Product {
        Product {
            id,
            name: name.to_string(),
            category: category.to_string(),
            quantity: 1,
            supplier: supplier.to_string(),
            status,
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = vec![
            product(1, "iPhone 15 Pro", "Electronics", "Apple Inc", ProductStatus::InStock),
            product(3, "Gaming Chair", "Furniture", "Herman Miller", ProductStatus::OutOfStock),
        ];

        let filtered = filter_products(&products, &FilterCriteria::search("iphone"));
        assert_eq!(filtered, vec![products[0].clone()]);

        let view = compute_view(&products, &FilterCriteria::search("IPHONE"));
        assert_eq!(view.len(), 1);
        assert_eq!(view.lane(ProductStatus::InStock)[0].id, 1);
        assert!(view.lane(ProductStatus::OutOfStock).is_empty());
    }

    #[test]
    fn test_category_and_supplier_filters_are_exact() {
        let products = seed_products();
        let filters = FilterCriteria {
            category_filter: "Electronics".to_string(),
            supplier_filter: "Apple Inc".to_string(),
            ..Default::default()
        };

        let names: Vec<_> = filter_products(&products, &filters)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["iPhone 15 Pro", "MacBook Air M3"]);

        let partial = FilterCriteria {
            category_filter: "Electro".to_string(),
            ..Default::default()
        };
        assert!(filter_products(&products, &partial).is_empty());
    }

    #[test]
    fn test_empty_filters_match_all() {
        let products = seed_products();
        assert!(FilterCriteria::none().is_empty());
        assert_eq!(filter_products(&products, &FilterCriteria::none()), products);
    }

    #[test]
    fn test_view_always_has_three_lanes_in_order() {
        let view = compute_view(&[], &FilterCriteria::none());
        let statuses: Vec<_> = view.lanes.iter().map(|l| l.status).collect();
        assert_eq!(statuses, ProductStatus::ALL.to_vec());
        assert!(view.is_empty());
    }

    #[test]
    fn test_lanes_preserve_source_order() {
        let products = seed_products();
        let view = compute_view(&products, &FilterCriteria::none());
        let low: Vec<_> = view.lane(ProductStatus::LowStock).iter().map(|p| p.id).collect();
        assert_eq!(low, vec![2, 5, 8]);
    }

    #[test]
    fn test_summaries() {
        let products = seed_products();
        let totals = summarize(&products);
        assert_eq!(totals.total, 8);
        assert_eq!(totals.in_stock, 3);
        assert_eq!(totals.low_stock, 3);
        assert_eq!(totals.out_of_stock, 2);

        let view = compute_view(&products, &FilterCriteria::search("chair"));
        assert_eq!(view.summary().count(ProductStatus::OutOfStock), 1);
        assert_eq!(view.summary().total, 1);
    }

    #[test]
    fn test_distinct_options_keep_first_appearance_order() {
        let products = seed_products();
        assert_eq!(categories(&products), vec!["Electronics", "Furniture", "Appliances"]);
        assert_eq!(
            suppliers(&products),
            vec!["Apple Inc", "Herman Miller", "Logitech", "IKEA", "Samsung", "Breville", "Dyson"]
        );
    }

    fn arb_status() -> impl Strategy<Value = ProductStatus> {
        prop_oneof![
            Just(ProductStatus::InStock),
            Just(ProductStatus::LowStock),
            Just(ProductStatus::OutOfStock),
        ]
    }

    fn arb_products() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec(
            ("[a-zA-Z ]{1,12}", "(A|B|C)", "(X|Y)", 0u32..100, arb_status()),
            0..20,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, category, supplier, quantity, status))| Product {
                    id: i as i64,
                    name,
                    category,
                    quantity,
                    supplier,
                    status,
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_view_is_deterministic(
            products in arb_products(),
            search in "[a-z]{0,3}",
            category in prop::sample::select(vec!["", "A", "B"]),
        ) {
            let filters = FilterCriteria {
                search_text: search,
                category_filter: category.to_string(),
                supplier_filter: String::new(),
            };
            let first = compute_view(&products, &filters);
            let second = compute_view(&products, &filters);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), filter_products(&products, &filters).len());
        }
    }
}
