//! # Board Commands
//!
//! The rendered board, the filter bar and lane drops.

use tracing::debug;

use stockpile_core::{DropRequest, FilterCriteria, InventorySummary};

use crate::error::ApiError;
use crate::state::{BoardSnapshot, BoardState, DropOutcome, Pacer, TransitionOrchestrator};

/// Gets everything needed to render the board.
pub async fn get_board(state: &BoardState) -> BoardSnapshot {
    debug!("get_board command");
    state.with_board(|board| board.snapshot()).await
}

/// Replaces the search text and filters, returning the re-rendered board.
pub async fn set_filters(state: &BoardState, filters: FilterCriteria) -> BoardSnapshot {
    debug!("set_filters command");
    state
        .with_board_mut(|board| {
            board.set_filters(filters);
            board.snapshot()
        })
        .await
}

/// Gets lane counts for the whole collection.
pub async fn get_summary(state: &BoardState) -> InventorySummary {
    state.with_board(|board| board.summary()).await
}

/// Drops a card onto a lane and waits for the transition to settle.
///
/// ## Returns
/// * `Moved` - the committed record
/// * `Skipped` - unknown id, same lane, or the card is already moving
pub async fn move_product<P: Pacer>(
    state: &BoardState,
    orchestrator: &TransitionOrchestrator<P>,
    request: DropRequest,
) -> Result<DropOutcome, ApiError> {
    debug!(id = request.source_id, to = %request.target_status, "move_product command");
    Ok(orchestrator.handle_drop(state, request).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Board, Immediate};
    use stockpile_core::{LaneQuantityRule, ProductStatus, SkipReason};
    use stockpile_store::{InventoryStorage, MemoryStore, ProductStore};

    fn state() -> BoardState {
        BoardState::new(Board::new(ProductStore::initialize(
            InventoryStorage::new(MemoryStore::new()),
        )))
    }

    #[tokio::test]
    async fn test_filters_iphone_scenario() {
        let state = state();
        let snapshot = set_filters(&state, FilterCriteria::search("iphone")).await;

        assert_eq!(snapshot.view.lane(ProductStatus::InStock).len(), 1);
        assert!(snapshot.view.lane(ProductStatus::LowStock).is_empty());
        assert!(snapshot.view.lane(ProductStatus::OutOfStock).is_empty());

        // Filters stick until changed.
        assert_eq!(get_board(&state).await.visible.total, 1);
        assert_eq!(get_summary(&state).await.total, 8);
    }

    #[tokio::test]
    async fn test_move_product() {
        let state = state();
        let orchestrator = TransitionOrchestrator::new(Immediate, LaneQuantityRule::Preserve);

        let outcome = move_product(
            &state,
            &orchestrator,
            DropRequest::new(3, ProductStatus::InStock),
        )
        .await
        .unwrap();
        assert!(matches!(outcome, DropOutcome::Moved(ref p) if p.id == 3));

        let outcome = move_product(
            &state,
            &orchestrator,
            DropRequest::new(3, ProductStatus::InStock),
        )
        .await
        .unwrap();
        assert_eq!(outcome, DropOutcome::Skipped(SkipReason::SameLane));
    }

    #[tokio::test]
    async fn test_move_outcome_serialization() {
        let state = state();
        let orchestrator = TransitionOrchestrator::new(Immediate, LaneQuantityRule::Preserve);

        let outcome = move_product(
            &state,
            &orchestrator,
            DropRequest::new(99, ProductStatus::InStock),
        )
        .await
        .unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "skipped");
        assert_eq!(json["detail"], "unknown_product");
    }
}
