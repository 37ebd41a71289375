//! # Product Store
//!
//! Owns the authoritative product collection and is the only writer of
//! persisted state.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every Mutating Operation                             │
//! │                                                                         │
//! │  1. validate input ──── invalid? ──► Err, memory and storage untouched  │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  2. commit to the in-memory collection                                  │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  3. exactly one adapter write (snapshot or clear marker)                │
//! │          │                                                              │
//! │          ├── ok     ──► durable                                         │
//! │          └── failed ──► warn!, keep memory, remember pending warning    │
//! │                         (a later successful write or flush() recovers)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Id Assignment
//! New ids are `max(now_millis, largest_id + 1)`: a creation timestamp that
//! still stays unique when two products are added within one millisecond.
//! When `largest_id` is already `i64::MAX`, the highest unused id at or
//! below `now_millis` is taken instead.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, info, warn};

use stockpile_core::validation::{validate_collection, validate_draft, validate_product};
use stockpile_core::{seed_products, Product, ProductDraft, ProductPatch, ValidationError};

use crate::error::{PersistResult, PersistenceError, StoreError, StoreResult};
use crate::storage::{InventoryStorage, PersistedInventory};

/// Source of "now" in milliseconds, used for new ids.
pub type MillisClock = fn() -> i64;

fn system_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Where the collection came from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// A stored snapshot.
    Stored,
    /// The user had cleared the inventory.
    Cleared,
    /// Nothing stored yet; seed collection.
    Seed,
    /// Stored data was unreadable; seed collection.
    Recovered,
}

/// Pieces of state whose last write did not reach storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Dirty {
    products: bool,
    dark_mode: bool,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Products,
    DarkMode,
}

impl Dirty {
    fn flag(&mut self, slot: Slot) -> &mut bool {
        match slot {
            Slot::Products => &mut self.products,
            Slot::DarkMode => &mut self.dark_mode,
        }
    }
}

/// The authoritative product collection.
#[derive(Debug)]
pub struct ProductStore {
    storage: InventoryStorage,
    products: Vec<Product>,
    dark_mode: bool,
    /// True between a clear() and the next collection write.
    cleared: bool,
    load_source: LoadSource,
    dirty: Dirty,
    warning: Option<PersistenceError>,
    clock: MillisClock,
}

impl ProductStore {
    /// Loads the collection and preferences from storage.
    ///
    /// Never fails: unreadable data is logged and treated as absent.
    pub fn initialize(storage: InventoryStorage) -> Self {
        let (products, load_source) = match storage.load_products() {
            Ok(PersistedInventory::Stored(products)) => (products, LoadSource::Stored),
            Ok(PersistedInventory::Cleared) => (Vec::new(), LoadSource::Cleared),
            Ok(PersistedInventory::Uninitialized) => (seed_products(), LoadSource::Seed),
            Err(e) => {
                warn!(error = %e, "Stored inventory unreadable, using sample data");
                (seed_products(), LoadSource::Recovered)
            }
        };

        let dark_mode = storage.load_dark_mode().unwrap_or_else(|e| {
            warn!(error = %e, "Stored dark-mode flag unreadable, using light mode");
            None
        });

        info!(
            count = products.len(),
            source = ?load_source,
            "Product store initialized"
        );

        ProductStore {
            storage,
            cleared: load_source == LoadSource::Cleared,
            products,
            dark_mode: dark_mode.unwrap_or(false),
            load_source,
            dirty: Dirty::default(),
            warning: None,
            clock: system_millis,
        }
    }

    /// Replaces the clock used for new ids.
    pub fn with_clock(mut self, clock: MillisClock) -> Self {
        self.clock = clock;
        self
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The collection in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Checks if everything in memory has reached storage.
    pub fn is_durable(&self) -> bool {
        !self.dirty.products && !self.dirty.dark_mode
    }

    /// Takes the most recent write failure, if any, for display.
    pub fn take_warning(&mut self) -> Option<PersistenceError> {
        self.warning.take()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product from the add form.
    ///
    /// ## Errors
    /// * `Validation` - a required field is blank; nothing is written
    pub fn create(&mut self, draft: ProductDraft) -> StoreResult<Product> {
        validate_draft(&draft)?;

        let product = Product::from_draft(self.next_id()?, draft);
        self.products.push(product.clone());
        self.cleared = false;

        debug!(id = product.id, name = %product.name, "Product created");
        self.persist_products();
        Ok(product)
    }

    /// Applies an edit to an existing product. The id never changes.
    ///
    /// ## Errors
    /// * `NotFound` - no product with this id
    /// * `Validation` - the edit would blank a required field
    pub fn update(&mut self, id: i64, patch: &ProductPatch) -> StoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound { id })?;

        let updated = self.products[index].patched(patch);
        validate_product(&updated)?;
        self.products[index] = updated.clone();

        debug!(id, status = %updated.status, "Product updated");
        self.persist_products();
        Ok(updated)
    }

    /// Replaces the whole collection (import, reset).
    ///
    /// ## Errors
    /// * `Validation` - any record is invalid or ids repeat; the current
    ///   collection is kept as it was
    pub fn replace_all(&mut self, products: Vec<Product>) -> StoreResult<&[Product]> {
        validate_collection(&products)?;

        self.products = products;
        self.cleared = false;

        info!(count = self.products.len(), "Collection replaced");
        self.persist_products();
        Ok(&self.products)
    }

    /// Restores the sample collection.
    pub fn reset_to_seed(&mut self) -> StoreResult<&[Product]> {
        self.replace_all(seed_products())
    }

    /// Empties the collection and records the clear in storage.
    ///
    /// Like every other mutation this is a single adapter write: setting the
    /// cleared marker and dropping the stored snapshot go to the backend as
    /// one `replace`.
    pub fn clear(&mut self) {
        self.products.clear();
        self.cleared = true;

        info!("Collection cleared");
        let result = self.storage.mark_cleared();
        self.record_write(result, Slot::Products);
    }

    /// Sets the dark-mode preference.
    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
        let result = self.storage.save_dark_mode(enabled);
        self.record_write(result, Slot::DarkMode);
    }

    /// Retries any write that failed earlier.
    ///
    /// ## Errors
    /// * `Persistence` - storage is still unavailable
    pub fn flush(&mut self) -> StoreResult<()> {
        if self.dirty.products {
            self.write_products()?;
            self.dirty.products = false;
        }
        if self.dirty.dark_mode {
            self.storage.save_dark_mode(self.dark_mode)?;
            self.dirty.dark_mode = false;
        }
        self.warning = None;
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn next_id(&self) -> StoreResult<i64> {
        let now = (self.clock)();
        let Some(max) = self.products.iter().map(|p| p.id).max() else {
            return Ok(now);
        };
        if let Some(after_last) = max.checked_add(1) {
            return Ok(now.max(after_last));
        }

        // Top of the range is taken.
        let taken: HashSet<i64> = self.products.iter().map(|p| p.id).collect();
        (i64::MIN..=now)
            .rev()
            .find(|id| !taken.contains(id))
            .ok_or_else(|| {
                StoreError::Validation(ValidationError::Duplicate {
                    field: "id".to_string(),
                    value: now.to_string(),
                })
            })
    }

    fn write_products(&mut self) -> PersistResult<()> {
        if self.cleared {
            self.storage.mark_cleared()
        } else {
            self.storage.save_products(&self.products)
        }
    }

    fn persist_products(&mut self) {
        let result = self.write_products();
        self.record_write(result, Slot::Products);
    }

    fn record_write(&mut self, result: PersistResult<()>, slot: Slot) {
        match result {
            Ok(()) => {
                let was_dirty = std::mem::replace(self.dirty.flag(slot), false);
                if was_dirty {
                    info!("Storage write succeeded again");
                }
                if self.is_durable() {
                    self.warning = None;
                }
            }
            Err(e) => {
                warn!(error = %e, "Storage write failed, changes kept in memory");
                *self.dirty.flag(slot) = true;
                self.warning = Some(e);
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use stockpile_core::{ProductStatus, PRODUCTS_KEY};

    fn fixed_clock() -> i64 {
        1_700_000_000_000
    }

    fn open(backend: &MemoryStore) -> ProductStore {
        ProductStore::initialize(InventoryStorage::new(backend.clone())).with_clock(fixed_clock)
    }

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            category: "Electronics".to_string(),
            supplier: "Logitech".to_string(),
            quantity: 12,
            status: None,
        }
    }

    #[test]
    fn test_initialize_falls_back_to_seed() {
        let backend = MemoryStore::new();
        let store = open(&backend);

        assert_eq!(store.products(), seed_products().as_slice());
        assert_eq!(store.load_source(), LoadSource::Seed);
        assert!(!store.dark_mode());
        // Loading never writes.
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn test_initialize_treats_corrupt_data_as_absent() {
        let backend =
            MemoryStore::with_values([(PRODUCTS_KEY, "not json"), ("dark-mode", "maybe")]);
        let store = open(&backend);

        assert_eq!(store.len(), 8);
        assert_eq!(store.load_source(), LoadSource::Recovered);
        assert!(!store.dark_mode());
    }

    #[test]
    fn test_create_appends_with_unique_id() {
        let backend = MemoryStore::new();
        let mut store = open(&backend);
        let before = store.len();

        let first = store.create(draft("Webcam")).unwrap();
        let second = store.create(draft("Headset")).unwrap();

        assert_eq!(store.len(), before + 2);
        assert_eq!(first.id, fixed_clock());
        // Same millisecond: still unique.
        assert_eq!(second.id, fixed_clock() + 1);
        assert_eq!(first.status, ProductStatus::InStock);
        assert_eq!(store.products().last(), Some(&second));
        assert_eq!(backend.write_count(), 2);
    }

    #[test]
    fn test_create_id_beats_existing_ids_when_clock_is_behind() {
        fn early() -> i64 {
            3
        }
        let backend = MemoryStore::new();
        let mut store = ProductStore::initialize(InventoryStorage::new(backend)).with_clock(early);

        let created = store.create(draft("Webcam")).unwrap();
        assert_eq!(created.id, 9);
    }

    #[test]
    fn test_create_after_largest_possible_id_stays_unique() {
        let backend = MemoryStore::new();
        let mut store = open(&backend);

        let mut top = seed_products()[0].clone();
        top.id = i64::MAX;
        let mut below_now = seed_products()[1].clone();
        below_now.id = fixed_clock();
        store.replace_all(vec![top, below_now]).unwrap();

        let first = store.create(draft("Webcam")).unwrap();
        let second = store.create(draft("Headset")).unwrap();

        assert_eq!(first.id, fixed_clock() - 1);
        assert_eq!(second.id, fixed_clock() - 2);
        assert!(validate_collection(store.products()).is_ok());

        // The saved snapshot still reads back as stored.
        let reloaded = open(&backend);
        assert_eq!(reloaded.load_source(), LoadSource::Stored);
        assert_eq!(reloaded.len(), 4);
    }

    #[test]
    fn test_create_rejects_blank_fields_without_writing() {
        let backend = MemoryStore::new();
        let mut store = open(&backend);

        let mut bad = draft("Webcam");
        bad.supplier = "  ".to_string();

        assert!(matches!(store.create(bad), Err(StoreError::Validation(_))));
        assert_eq!(store.len(), 8);
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn test_update_preserves_id_and_persists() {
        let backend = MemoryStore::new();
        let mut store = open(&backend);

        let patch = ProductPatch {
            name: Some("iPhone 15 Pro Max".to_string()),
            status: Some(ProductStatus::LowStock),
            ..Default::default()
        };
        let updated = store.update(1, &patch).unwrap();

        assert_eq!(updated.id, 1);
        assert_eq!(updated.quantity, 25);
        assert_eq!(store.get(1), Some(&updated));
        assert_eq!(backend.write_count(), 1);
        assert!(backend.raw(PRODUCTS_KEY).unwrap().contains("iPhone 15 Pro Max"));
    }

    #[test]
    fn test_update_errors_leave_state_intact() {
        let backend = MemoryStore::new();
        let mut store = open(&backend);

        assert!(matches!(
            store.update(404, &ProductPatch::status(ProductStatus::InStock)),
            Err(StoreError::NotFound { id: 404 })
        ));

        let blank = ProductPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(store.update(1, &blank), Err(StoreError::Validation(_))));

        assert_eq!(store.products(), seed_products().as_slice());
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn test_replace_all_is_atomic() {
        let backend = MemoryStore::new();
        let mut store = open(&backend);
        let before = store.products().to_vec();

        let mut payload = seed_products();
        payload[3].category = String::new();

        assert!(store.replace_all(payload).is_err());
        assert_eq!(store.products(), before.as_slice());
        assert_eq!(backend.write_count(), 0);

        let replaced = store.replace_all(seed_products()[..2].to_vec()).unwrap();
        assert_eq!(replaced.len(), 2);
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn test_clear_then_reload_stays_empty() {
        let backend = MemoryStore::new();
        let mut store = open(&backend);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(backend.raw(PRODUCTS_KEY), None);
        assert_eq!(backend.write_count(), 1);

        let reloaded = open(&backend);
        assert!(reloaded.is_empty());
        assert_eq!(reloaded.load_source(), LoadSource::Cleared);
    }

    #[test]
    fn test_create_after_clear_is_persisted() {
        let backend = MemoryStore::new();
        let mut store = open(&backend);

        store.clear();
        store.create(draft("Webcam")).unwrap();

        let reloaded = open(&backend);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.load_source(), LoadSource::Stored);
    }

    #[test]
    fn test_reset_to_seed() {
        let backend = MemoryStore::new();
        let mut store = open(&backend);

        store.clear();
        store.reset_to_seed().unwrap();

        assert_eq!(open(&backend).products(), seed_products().as_slice());
    }

    #[test]
    fn test_write_failure_is_non_fatal_and_recoverable() {
        let backend = MemoryStore::new();
        let mut store = open(&backend);

        backend.set_fail_writes(true);
        let created = store.create(draft("Webcam")).unwrap();

        assert_eq!(store.get(created.id), Some(&created));
        assert!(!store.is_durable());
        assert!(matches!(
            store.take_warning(),
            Some(PersistenceError::Unavailable(_))
        ));

        assert!(store.flush().is_err());

        backend.set_fail_writes(false);
        store.flush().unwrap();
        assert!(store.is_durable());
        assert_eq!(open(&backend).get(created.id), Some(&created));
    }

    #[test]
    fn test_dark_mode_persists() {
        let backend = MemoryStore::new();
        let mut store = open(&backend);

        store.set_dark_mode(true);
        assert!(store.dark_mode());
        assert!(open(&backend).dark_mode());
    }
}
