//! # Transfer Commands
//!
//! Whole-collection operations: export, import, reset to sample data, clear.
//!
//! ## Import Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  user picks inventory.json                                              │
//! │       │                                                                 │
//! │       ▼  tokio::fs::read_to_string  (the only file-system suspension)   │
//! │  import_products(text)                                                  │
//! │       │                                                                 │
//! │       ├── not an array / bad record / duplicate id ──► INVALID_FILE     │
//! │       │                                  (collection untouched)         │
//! │       ▼                                                                 │
//! │  replace_all(products) ──► one storage write                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ApiError, ErrorCode};
use crate::state::{BoardState, ConfigState};

/// Gets the export document for the current collection.
pub async fn export_inventory(state: &BoardState) -> String {
    debug!("export_inventory command");
    state.with_board(|board| board.export()).await
}

/// Writes the export document to `path`, or to the configured export file.
///
/// ## Returns
/// The path written.
pub async fn export_to_file(
    state: &BoardState,
    config: &ConfigState,
    path: Option<&Path>,
) -> Result<PathBuf, ApiError> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.export_file));
    let document = export_inventory(state).await;

    tokio::fs::write(&path, document.as_bytes())
        .await
        .map_err(|e| ApiError::storage(format!("Could not write {}: {e}", path.display())))?;

    info!(path = %path.display(), "Inventory exported");
    Ok(path)
}

/// Replaces the collection with an import document.
///
/// ## Returns
/// Number of products now on the board.
pub async fn import_inventory(state: &BoardState, text: &str) -> Result<usize, ApiError> {
    debug!(bytes = text.len(), "import_inventory command");
    state
        .with_board_mut(|board| board.import(text).map(<[_]>::len))
        .await
}

/// Reads an import file and replaces the collection with it.
pub async fn import_from_file(state: &BoardState, path: &Path) -> Result<usize, ApiError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        ApiError::new(
            ErrorCode::InvalidFile,
            format!("Could not read {}: {e}", path.display()),
        )
    })?;

    let count = import_inventory(state, &text).await?;
    info!(path = %path.display(), count, "Inventory imported");
    Ok(count)
}

/// Restores the sample collection.
pub async fn reset_inventory(state: &BoardState) -> Result<usize, ApiError> {
    debug!("reset_inventory command");
    let count = state
        .with_board_mut(|board| board.reset_to_seed().map(<[_]>::len))
        .await?;
    Ok(count)
}

/// Removes every product. A later reload stays empty.
pub async fn clear_inventory(state: &BoardState) {
    debug!("clear_inventory command");
    state.with_board_mut(|board| board.clear()).await;
}
