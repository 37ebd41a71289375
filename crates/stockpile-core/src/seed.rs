//! Sample inventory used when nothing has been stored yet, and by
//! "reset to sample data".

use crate::types::{Product, ProductStatus};

/// Number of records in the seed collection.
pub const SEED_LEN: usize = 8;

/// Returns the fixed seed collection (ids 1 through 8).
pub fn seed_products() -> Vec<Product> {
    const ROWS: [(i64, &str, &str, u32, &str, ProductStatus); SEED_LEN] = [
        (1, "iPhone 15 Pro", "Electronics", 25, "Apple Inc", ProductStatus::InStock),
        (2, "MacBook Air M3", "Electronics", 8, "Apple Inc", ProductStatus::LowStock),
        (3, "Gaming Chair", "Furniture", 0, "Herman Miller", ProductStatus::OutOfStock),
        (4, "Wireless Mouse", "Electronics", 45, "Logitech", ProductStatus::InStock),
        (5, "Standing Desk", "Furniture", 3, "IKEA", ProductStatus::LowStock),
        (6, "Monitor 4K", "Electronics", 0, "Samsung", ProductStatus::OutOfStock),
        (7, "Coffee Maker", "Appliances", 15, "Breville", ProductStatus::InStock),
        (8, "Air Purifier", "Appliances", 2, "Dyson", ProductStatus::LowStock),
    ];

    ROWS.iter()
        .map(|&(id, name, category, quantity, supplier, status)| Product {
            id,
            name: name.to_string(),
            category: category.to_string(),
            quantity,
            supplier: supplier.to_string(),
            status,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_collection;

    #[test]
    fn test_seed_is_valid_and_stable() {
        let seed = seed_products();
        assert_eq!(seed.len(), SEED_LEN);
        assert!(validate_collection(&seed).is_ok());
        assert_eq!(seed, seed_products());
    }
}
