//! # Lane Transitions
//!
//! Pure half of the drag-and-drop state machine: which drops are allowed and
//! which cards are mid-animation. Timing lives in the board app.
//!
//! ## Per-card States
//! ```text
//!            drop accepted                      settle delay over
//!   ┌──────┐ ───────────────► ┌───────────┐ ─────────────────────► ┌──────┐
//!   │ Idle │                  │ Animating │                        │ Idle │
//!   └──────┘ ◄─── no-op ───── └───────────┘                        └──────┘
//!      ▲    unknown id /        │  enter delay over:
//!      │    same lane /         │  status committed to the store
//!      │    already animating   ▼
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{DropRequest, Product};

/// Why a drop did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SkipReason {
    /// The dragged id is not in the collection.
    UnknownProduct,
    /// The card is already mid-transition; overlapping moves are rejected.
    InFlight,
    /// The card was dropped on its own lane.
    SameLane,
}

/// Visual state of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CardPhase {
    Idle,
    Animating,
}

/// Ids of cards currently mid-transition.
///
/// Only drives a visual cue; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimatingSet(BTreeSet<i64>);

impl AnimatingSet {
    pub fn new() -> Self {
        AnimatingSet::default()
    }

    /// Marks a card as animating. Returns `false` if it already was.
    pub fn begin(&mut self, id: i64) -> bool {
        self.0.insert(id)
    }

    /// Returns a card to idle. Returns `false` if it was not animating.
    pub fn finish(&mut self, id: i64) -> bool {
        self.0.remove(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    pub fn phase(&self, id: i64) -> CardPhase {
        if self.contains(id) {
            CardPhase::Animating
        } else {
            CardPhase::Idle
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> Vec<i64> {
        self.0.iter().copied().collect()
    }
}

/// Decides whether a drop starts a transition.
///
/// Returns the product being moved, or the reason the drop is a no-op.
pub fn check_drop<'a>(
    products: &'a [Product],
    animating: &AnimatingSet,
    request: &DropRequest,
) -> Result<&'a Product, SkipReason> {
    let product = products
        .iter()
        .find(|p| p.id == request.source_id)
        .ok_or(SkipReason::UnknownProduct)?;

    if animating.contains(product.id) {
        return Err(SkipReason::InFlight);
    }

    if product.status == request.target_status {
        return Err(SkipReason::SameLane);
    }

    Ok(product)
}
