//! # Transition Orchestrator
//!
//! Turns a drop into a paced, two-phase lane change.
//!
//! ## Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Drop ──► Animating ──► Idle                          │
//! │                                                                         │
//! │  lock ─► check (unknown / in flight / same lane?) ── yes ─► Skipped     │
//! │   │          │                                                          │
//! │   │          no                                                         │
//! │   │          ▼                                                          │
//! │   │     card enters Animating                                           │
//! │  unlock                                                                 │
//! │          pause(Enter)          ◄── other commands may run here          │
//! │  lock ─► commit status (+ lane quantity rule) via the store            │
//! │  unlock                                                                 │
//! │          pause(Settle)                                                  │
//! │  lock ─► card returns to Idle (also when the commit failed)             │
//! │  unlock                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Drops on different cards overlap freely. A drop on a card that is
//! already animating is rejected with [`SkipReason::InFlight`].

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use stockpile_core::{DropRequest, LaneQuantityRule, Product, SkipReason};
use stockpile_store::StoreResult;

use crate::state::{BoardState, ConfigState};

/// The two pauses of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingPhase {
    /// Between entering Animating and the commit.
    Enter,
    /// Between the commit and returning to Idle.
    Settle,
}

/// Supplies the delays of a transition.
pub trait Pacer: Send + Sync {
    fn pause(&self, phase: PacingPhase) -> impl Future<Output = ()> + Send;
}

/// Wall-clock pacing with tokio timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerPacer {
    pub enter: Duration,
    pub settle: Duration,
}

impl TimerPacer {
    pub fn new(enter: Duration, settle: Duration) -> Self {
        TimerPacer { enter, settle }
    }

    pub fn from_config(config: &ConfigState) -> Self {
        TimerPacer::new(config.enter_delay(), config.settle_delay())
    }
}

impl Pacer for TimerPacer {
    fn pause(&self, phase: PacingPhase) -> impl Future<Output = ()> + Send {
        let delay = match phase {
            PacingPhase::Enter => self.enter,
            PacingPhase::Settle => self.settle,
        };
        tokio::time::sleep(delay)
    }
}

/// No delays at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Pacer for Immediate {
    fn pause(&self, _phase: PacingPhase) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum DropOutcome {
    /// The card changed lane; carries the committed record.
    Moved(Product),
    /// Nothing happened.
    Skipped(SkipReason),
}

/// Runs drops against a board.
#[derive(Debug, Clone)]
pub struct TransitionOrchestrator<P> {
    pacer: P,
    rule: LaneQuantityRule,
}

impl TransitionOrchestrator<TimerPacer> {
    /// Orchestrator with the configured delays and lane rule.
    pub fn from_config(config: &ConfigState) -> Self {
        TransitionOrchestrator::new(TimerPacer::from_config(config), config.lane_quantity_rule)
    }
}

impl<P: Pacer> TransitionOrchestrator<P> {
    pub fn new(pacer: P, rule: LaneQuantityRule) -> Self {
        TransitionOrchestrator { pacer, rule }
    }

    pub fn rule(&self) -> LaneQuantityRule {
        self.rule
    }

    /// Runs one drop to completion.
    ///
    /// ## Errors
    /// * Store errors from the commit (e.g. the product was removed while
    ///   animating). The card still returns to Idle.
    pub async fn handle_drop(
        &self,
        state: &BoardState,
        request: DropRequest,
    ) -> StoreResult<DropOutcome> {
        let before = {
            let mut board = state.lock().await;
            match board.begin_transition(&request) {
                Ok(product) => product,
                Err(reason) => {
                    debug!(id = request.source_id, ?reason, "Drop ignored");
                    return Ok(DropOutcome::Skipped(reason));
                }
            }
        };

        self.pacer.pause(PacingPhase::Enter).await;

        let committed = state
            .with_board_mut(|board| board.commit_transition(&request, self.rule))
            .await;

        self.pacer.pause(PacingPhase::Settle).await;

        state
            .with_board_mut(|board| board.finish_transition(request.source_id))
            .await;

        match committed {
            Ok(product) => {
                info!(
                    id = product.id,
                    from = %before.status,
                    to = %product.status,
                    "Product moved"
                );
                Ok(DropOutcome::Moved(product))
            }
            Err(e) => {
                warn!(id = request.source_id, error = %e, "Lane change failed");
                Err(e)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
