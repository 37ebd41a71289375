//! # stockpile-core: Pure Inventory Logic for Stockpile
//!
//! This crate holds the domain of the inventory board as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockpile Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Board front end (browser / CLI)                 │   │
//! │  │    Search ──► Filters ──► Lanes ──► Drag card ──► Export        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockpile-board (controller)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockpile-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   view    │  │   codec   │  │ validation│  │   │
//! │  │   │  Product  │  │  filters  │  │  export   │  │   rules   │  │   │
//! │  │   │  Status   │  │  lanes    │  │  import   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO TIMERS • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                stockpile-store (persistence)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, status, draft/patch, drop messages
//! - [`transition`] - Drop guards and the animating set
//! - [`view`] - Filters, lane grouping, summaries
//! - [`codec`] - JSON export/import
//! - [`validation`] - Record validation
//! - [`seed`] - Sample collection
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stockpile_core::view::{compute_view, FilterCriteria};
//! use stockpile_core::{seed_products, ProductStatus};
//!
//! let products = seed_products();
//! let view = compute_view(&products, &FilterCriteria::search("iphone"));
//!
//! assert_eq!(view.lane(ProductStatus::InStock).len(), 1);
//! assert!(view.lane(ProductStatus::LowStock).is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod seed;
pub mod transition;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use codec::{export_products, import_products, DEFAULT_EXPORT_FILE};
pub use error::{ImportError, ValidationError};
pub use seed::seed_products;
pub use transition::{check_drop, AnimatingSet, CardPhase, SkipReason};
pub use types::*;
pub use view::{BoardView, FilterCriteria, InventorySummary, Lane};

// =============================================================================
// Storage Keys
// =============================================================================

/// Key holding the JSON array of products.
pub const PRODUCTS_KEY: &str = "inventory-products";

/// Key holding the JSON boolean dark-mode flag.
pub const DARK_MODE_KEY: &str = "dark-mode";

/// Key holding the JSON boolean set by an explicit clear.
///
/// Lets a reload tell "cleared on purpose" apart from "never stored".
pub const CLEARED_KEY: &str = "inventory-cleared";
