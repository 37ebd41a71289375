//! # Product Commands
//!
//! Lookup plus the add and edit forms.
//!
//! ## Form Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Add / Edit form                                                        │
//! │       │                                                                 │
//! │       ▼ submit                                                          │
//! │  add_product(draft) / edit_product(id, patch)                          │
//! │       │                                                                 │
//! │       ├── blank name/category/supplier ──► VALIDATION_ERROR             │
//! │       │                                   (form stays open)             │
//! │       ├── unknown id ──────────────────► NOT_FOUND                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  committed + persisted; new card appears in its lane                   │
//! │                                                                         │
//! │  Closing the form without submitting issues no command.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use stockpile_core::{Product, ProductDraft, ProductPatch};

use crate::error::ApiError;
use crate::state::BoardState;

/// Gets a product by its id.
pub async fn get_product(state: &BoardState, id: i64) -> Result<Product, ApiError> {
    debug!(id, "get_product command");
    state
        .with_board(|board| board.get(id).cloned())
        .await
        .ok_or_else(|| ApiError::not_found(id))
}

/// Adds a product from the add form.
///
/// ## Returns
/// The stored product with its assigned id. Status defaults to In Stock.
pub async fn add_product(state: &BoardState, draft: ProductDraft) -> Result<Product, ApiError> {
    debug!(name = %draft.name, "add_product command");
    let product = state.with_board_mut(|board| board.create(draft)).await?;
    Ok(product)
}

/// Applies the edit form to an existing product.
///
/// ## Errors
/// * `VALIDATION_ERROR` - the patch is empty or blanks a required field
/// * `NOT_FOUND` - no product with this id
pub async fn edit_product(
    state: &BoardState,
    id: i64,
    patch: ProductPatch,
) -> Result<Product, ApiError> {
    debug!(id, "edit_product command");
    if patch.is_empty() {
        return Err(ApiError::validation("Nothing to change"));
    }
    let product = state.with_board_mut(|board| board.update(id, &patch)).await?;
    Ok(product)
}
