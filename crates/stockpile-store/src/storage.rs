//! # Inventory Storage
//!
//! The persistence adapter: maps the board's state onto storage keys as JSON.
//!
//! ## Keys
//! ```text
//! ┌──────────────────────┬──────────────────────┬─────────────────────────┐
//! │ key                  │ value                │ absent means            │
//! ├──────────────────────┼──────────────────────┼─────────────────────────┤
//! │ inventory-products   │ JSON array (Product) │ see tri-state below     │
//! │ inventory-cleared    │ JSON boolean         │ never cleared           │
//! │ dark-mode            │ JSON boolean         │ light mode              │
//! └──────────────────────┴──────────────────────┴─────────────────────────┘
//! ```
//!
//! ## Tri-state Inventory
//! ```text
//! products key?  ── yes ──► Stored(products)     (even when the array is [])
//!      │
//!      no
//!      ▼
//! cleared marker? ── yes ──► Cleared             (load as empty)
//!      │
//!      no
//!      ▼
//! Uninitialized                                  (load the seed)
//! ```

use stockpile_core::validation::validate_collection;
use stockpile_core::{Product, CLEARED_KEY, DARK_MODE_KEY, PRODUCTS_KEY};

use crate::error::{PersistResult, PersistenceError};
use crate::kv::KeyValueStore;

/// What storage says about the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistedInventory {
    /// Nothing has ever been stored.
    Uninitialized,
    /// The user cleared the inventory on purpose.
    Cleared,
    /// A collection snapshot is stored.
    Stored(Vec<Product>),
}

/// JSON view over a key-value backend.
#[derive(Debug)]
pub struct InventoryStorage {
    backend: Box<dyn KeyValueStore>,
}

impl InventoryStorage {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        InventoryStorage {
            backend: Box::new(backend),
        }
    }

    /// Reads the inventory state.
    ///
    /// ## Returns
    /// * `Err(Corrupt)` - products key holds something other than a valid
    ///   product array (bad JSON, wrong shape, blank fields, repeated ids)
    pub fn load_products(&self) -> PersistResult<PersistedInventory> {
        match self.backend.get(PRODUCTS_KEY)? {
            Some(text) => {
                let products: Vec<Product> = serde_json::from_str(&text)
                    .map_err(|e| PersistenceError::corrupt(PRODUCTS_KEY, e.to_string()))?;
                validate_collection(&products)
                    .map_err(|e| PersistenceError::corrupt(PRODUCTS_KEY, e.to_string()))?;
                Ok(PersistedInventory::Stored(products))
            }
            None => {
                if self.read_flag(CLEARED_KEY)?.unwrap_or(false) {
                    Ok(PersistedInventory::Cleared)
                } else {
                    Ok(PersistedInventory::Uninitialized)
                }
            }
        }
    }

    /// Writes the full collection snapshot.
    pub fn save_products(&mut self, products: &[Product]) -> PersistResult<()> {
        let json = serde_json::to_string(products).map_err(|source| PersistenceError::Encode {
            key: PRODUCTS_KEY.to_string(),
            source,
        })?;
        self.backend.set(PRODUCTS_KEY, &json)
    }

    /// Records an explicit clear as one backend write: the cleared marker
    /// is set and the products entry removed.
    ///
    /// The marker goes first so that an interrupted clear reads back as the
    /// old snapshot rather than as a fresh install.
    pub fn mark_cleared(&mut self) -> PersistResult<()> {
        self.backend.replace(CLEARED_KEY, "true", PRODUCTS_KEY)
    }

    /// Reads the dark-mode flag, `None` when never set.
    pub fn load_dark_mode(&self) -> PersistResult<Option<bool>> {
        self.read_flag(DARK_MODE_KEY)
    }

    pub fn save_dark_mode(&mut self, enabled: bool) -> PersistResult<()> {
        self.backend
            .set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
    }

    fn read_flag(&self, key: &str) -> PersistResult<Option<bool>> {
        self.backend
            .get(key)?
            .map(|text| {
                serde_json::from_str::<bool>(&text)
                    .map_err(|e| PersistenceError::corrupt(key, e.to_string()))
            })
            .transpose()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
