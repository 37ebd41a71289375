//! # Config Commands
//!
//! Configuration retrieval, the dark-mode toggle and storage health.

use tracing::debug;

use crate::error::ApiError;
use crate::state::{BoardState, ConfigState};

/// Gets the current application configuration.
///
/// ## Returns
/// Complete configuration state (read-only)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// Gets the dark-mode preference.
pub async fn get_dark_mode(state: &BoardState) -> bool {
    state.with_board(|board| board.dark_mode()).await
}

/// Sets dark mode on or off.
pub async fn set_dark_mode(state: &BoardState, enabled: bool) -> bool {
    debug!(enabled, "set_dark_mode command");
    state.with_board_mut(|board| board.set_dark_mode(enabled)).await
}

/// Flips dark mode and returns the new value.
pub async fn toggle_dark_mode(state: &BoardState) -> bool {
    debug!("toggle_dark_mode command");
    state.with_board_mut(|board| board.toggle_dark_mode()).await
}

/// Takes the pending "changes not saved" warning, if any.
///
/// A failed storage write never fails the command that caused it; front ends
/// poll this after mutations to show a non-blocking notice.
pub async fn storage_warning(state: &BoardState) -> Option<String> {
    state
        .with_board_mut(|board| board.take_warning())
        .await
        .map(|e| format!("Changes are not saved yet: {e}"))
}

/// Retries storage writes that failed earlier.
pub async fn flush_storage(state: &BoardState) -> Result<(), ApiError> {
    debug!("flush_storage command");
    state.with_board_mut(|board| board.flush()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::Board;
    use stockpile_core::ProductDraft;
    use stockpile_store::{InventoryStorage, MemoryStore, ProductStore};

    fn state(backend: &MemoryStore) -> BoardState {
        BoardState::new(Board::new(ProductStore::initialize(
            InventoryStorage::new(backend.clone()),
        )))
    }

    #[tokio::test]
    async fn test_dark_mode_commands() {
        let backend = MemoryStore::new();
        let board = state(&backend);

        assert!(!get_dark_mode(&board).await);
        assert!(toggle_dark_mode(&board).await);
        assert!(!set_dark_mode(&board, false).await);
        assert!(toggle_dark_mode(&board).await);

        assert!(state(&backend).with_board(|b| b.dark_mode()).await);
    }

    #[tokio::test]
    async fn test_failed_write_surfaces_as_warning() {
        let backend = MemoryStore::new();
        let board = state(&backend);
        backend.set_fail_writes(true);

        let draft = ProductDraft {
            name: "Webcam".to_string(),
            category: "Electronics".to_string(),
            supplier: "Logitech".to_string(),
            ..Default::default()
        };
        board.with_board_mut(|b| b.create(draft)).await.unwrap();

        let warning = storage_warning(&board).await.unwrap();
        assert!(warning.starts_with("Changes are not saved yet"));
        assert_eq!(storage_warning(&board).await, None);

        let err = flush_storage(&board).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);

        backend.set_fail_writes(false);
        flush_storage(&board).await.unwrap();
        assert_eq!(state(&backend).with_board(|b| b.products().len()).await, 9);
    }

    #[test]
    fn test_get_config_is_a_copy() {
        let config = ConfigState::default();
        assert_eq!(get_config(&config), config);
    }
}
