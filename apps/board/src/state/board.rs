//! # Board State
//!
//! The one application-state value: product collection, filter criteria,
//! dark mode and the set of cards mid-transition.
//!
//! ## Thread Safety
//! The board is wrapped in `Arc<tokio::sync::Mutex<T>>` because:
//! 1. Commands and in-flight transitions share it
//! 2. Only one operation should modify it at a time
//! 3. Transitions re-acquire it after each pacing delay
//!
//! ## Board Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Board Operations                                     │
//! │                                                                         │
//! │  User Action              Board Operation          State Change         │
//! │  ───────────              ───────────────          ────────────         │
//! │                                                                         │
//! │  Submit add form ────────► create() ────────────► products.push(p)      │
//! │                                                                         │
//! │  Submit edit form ───────► update() ────────────► products[i] = p'      │
//! │                                                                         │
//! │  Type / pick filter ─────► set_filters() ───────► filters = f           │
//! │                                                                         │
//! │  Drop card on lane ──────► begin / commit / finish_transition()         │
//! │                                                                         │
//! │  Import file ────────────► import() ────────────► products = file       │
//! │                                                                         │
//! │  Reset / Clear ──────────► reset_to_seed() / clear()                    │
//! │                                                                         │
//! │  Toggle theme ───────────► toggle_dark_mode() ──► dark_mode = !d        │
//! │                                                                         │
//! │  Render ─────────────────► snapshot() ──────────► (read only)           │
//! │                                                                         │
//! │  NOTE: The view is never stored; it is recomputed from products and    │
//! │        filters on every read.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use stockpile_core::view::{categories, compute_view, summarize, suppliers};
use stockpile_core::{
    check_drop, export_products, import_products, AnimatingSet, BoardView, DropRequest,
    FilterCriteria, InventorySummary, LaneQuantityRule, Product, ProductDraft, ProductPatch,
    SkipReason,
};
use stockpile_store::{PersistenceError, ProductStore, StoreError, StoreResult};

use crate::error::ApiError;

/// Everything a front end needs to render the board.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub filters: FilterCriteria,
    /// Filtered products grouped into the three lanes
    pub view: BoardView,
    /// Lane counts of the filtered view
    pub visible: InventorySummary,
    /// Lane counts of the whole collection (header statistics)
    pub totals: InventorySummary,
    /// Category filter options
    pub categories: Vec<String>,
    /// Supplier filter options
    pub suppliers: Vec<String>,
    /// Ids of cards currently mid-transition
    pub animating: Vec<i64>,
    pub dark_mode: bool,
}

/// The board controller.
#[derive(Debug)]
pub struct Board {
    store: ProductStore,
    filters: FilterCriteria,
    animating: AnimatingSet,
    /// Animating ids whose record was swapped out by an import, reset or
    /// clear. Their pending commit is dropped.
    orphaned: BTreeSet<i64>,
}

impl Board {
    /// Creates a board over an initialized store, with no filters.
    pub fn new(store: ProductStore) -> Self {
        Board {
            store,
            filters: FilterCriteria::none(),
            animating: AnimatingSet::new(),
            orphaned: BTreeSet::new(),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn products(&self) -> &[Product] {
        self.store.products()
    }

    /// Looks up one product by id.
    pub fn get(&self, id: i64) -> Option<&Product> {
        self.store.get(id)
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn animating(&self) -> &AnimatingSet {
        &self.animating
    }

    pub fn dark_mode(&self) -> bool {
        self.store.dark_mode()
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    /// The filtered, lane-grouped view.
    pub fn view(&self) -> BoardView {
        compute_view(self.store.products(), &self.filters)
    }

    /// Lane counts over the whole collection.
    pub fn summary(&self) -> InventorySummary {
        summarize(self.store.products())
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let products = self.store.products();
        let view = compute_view(products, &self.filters);

        BoardSnapshot {
            filters: self.filters.clone(),
            visible: view.summary(),
            view,
            totals: summarize(products),
            categories: categories(products),
            suppliers: suppliers(products),
            animating: self.animating.ids(),
            dark_mode: self.store.dark_mode(),
        }
    }

    /// The export document for the current collection.
    pub fn export(&self) -> String {
        export_products(self.store.products())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn set_filters(&mut self, filters: FilterCriteria) {
        debug!(?filters, "Filters changed");
        self.filters = filters;
    }

    pub fn create(&mut self, draft: ProductDraft) -> StoreResult<Product> {
        self.store.create(draft)
    }

    pub fn update(&mut self, id: i64, patch: &ProductPatch) -> StoreResult<Product> {
        self.store.update(id, patch)
    }

    /// Replaces the collection with the contents of an import document.
    ///
    /// ## Errors
    /// * `InvalidFile` - the document is not a valid product array; the
    ///   collection is left as it was
    pub fn import(&mut self, text: &str) -> Result<&[Product], ApiError> {
        let products = import_products(text)?;
        info!(count = products.len(), "Importing inventory");
        self.store.replace_all(products)?;
        self.orphan_animating();
        Ok(self.store.products())
    }

    pub fn reset_to_seed(&mut self) -> StoreResult<&[Product]> {
        self.store.reset_to_seed()?;
        self.orphan_animating();
        Ok(self.store.products())
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.orphan_animating();
    }

    fn orphan_animating(&mut self) {
        self.orphaned.extend(self.animating.ids());
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> bool {
        self.store.set_dark_mode(enabled);
        enabled
    }

    /// Flips dark mode and returns the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        let enabled = !self.store.dark_mode();
        self.set_dark_mode(enabled)
    }

    /// Retries writes that failed earlier.
    pub fn flush(&mut self) -> StoreResult<()> {
        self.store.flush()
    }

    /// Takes the pending storage warning, if any.
    pub fn take_warning(&mut self) -> Option<PersistenceError> {
        self.store.take_warning()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Starts a lane transition: the card enters Animating.
    ///
    /// Returns the product as it was before the move, or why the drop is a
    /// no-op. A no-op changes nothing.
    pub fn begin_transition(&mut self, request: &DropRequest) -> Result<Product, SkipReason> {
        let product = check_drop(self.store.products(), &self.animating, request)?.clone();
        self.animating.begin(product.id);
        debug!(
            id = product.id,
            from = %product.status,
            to = %request.target_status,
            "Card animating"
        );
        Ok(product)
    }

    /// Commits the status change of an animating card.
    ///
    /// The quantity rule is applied to the record as it is now, so edits
    /// made during the enter delay are kept. If the collection was replaced
    /// since the card started moving, the card is treated as gone even when
    /// the new collection reuses its id.
    pub fn commit_transition(
        &mut self,
        request: &DropRequest,
        rule: LaneQuantityRule,
    ) -> StoreResult<Product> {
        let id = request.source_id;
        if self.orphaned.contains(&id) {
            return Err(StoreError::NotFound { id });
        }
        let current = self.store.get(id).ok_or(StoreError::NotFound { id })?;
        let patch = rule.move_patch(current, request.target_status);
        self.store.update(id, &patch)
    }

    /// Returns a card to Idle.
    pub fn finish_transition(&mut self, id: i64) {
        self.orphaned.remove(&id);
        if self.animating.finish(id) {
            debug!(id, "Card settled");
        }
    }
}

// =============================================================================
// Shared Handle
// =============================================================================

/// Shared handle to the board.
///
/// Uses `Arc<Mutex<Board>>` because:
/// - `Arc`: cheap clones for commands and spawned transitions
/// - `Mutex` (tokio): locked across the async command boundary, never held
///   through a pacing delay
#[derive(Debug, Clone)]
pub struct BoardState {
    board: Arc<Mutex<Board>>,
}

impl BoardState {
    pub fn new(board: Board) -> Self {
        BoardState {
            board: Arc::new(Mutex::new(board)),
        }
    }

    /// Locks the board until the guard is dropped.
    pub async fn lock(&self) -> MutexGuard<'_, Board> {
        self.board.lock().await
    }

    /// Executes a function with read access to the board.
    pub async fn with_board<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Board) -> R,
    {
        let board = self.board.lock().await;
        f(&board)
    }

    /// Executes a function with write access to the board.
    pub async fn with_board_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Board) -> R,
    {
        let mut board = self.board.lock().await;
        f(&mut board)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
