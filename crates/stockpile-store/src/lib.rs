//! # stockpile-store: Persistence Layer for Stockpile
//!
//! Owns the product collection and keeps it in durable key-value storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockpile Data Flow                              │
//! │                                                                         │
//! │  Board command (add / edit / import / drop)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockpile-store (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │ ProductStore  │───►│InventoryStorage│───►│KeyValueStore │  │   │
//! │  │   │ (collection,  │    │ (keys + JSON,  │    │ FileStore    │  │   │
//! │  │   │  validation)  │    │  tri-state)    │    │ MemoryStore  │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  <data dir>/inventory-products.json, dark-mode.json, ...        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - Raw key-value backends
//! - [`storage`] - Storage keys, JSON encoding, the tri-state inventory
//! - [`product_store`] - The collection and its mutations
//! - [`error`] - Persistence and store error types
//!
//! ## Usage
//!
//! ```rust
//! use stockpile_store::{InventoryStorage, MemoryStore, ProductStore};
//! use stockpile_core::ProductDraft;
//!
//! let mut store = ProductStore::initialize(InventoryStorage::new(MemoryStore::new()));
//! assert_eq!(store.len(), 8); // sample data on first run
//!
//! let draft = ProductDraft {
//!     name: "Desk Lamp".into(),
//!     category: "Furniture".into(),
//!     supplier: "IKEA".into(),
//!     ..Default::default()
//! };
//! let lamp = store.create(draft)?;
//! assert_eq!(store.get(lamp.id), Some(&lamp));
//! # Ok::<(), stockpile_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod product_store;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{PersistResult, PersistenceError, StoreError, StoreResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use product_store::{LoadSource, ProductStore};
pub use storage::{InventoryStorage, PersistedInventory};
