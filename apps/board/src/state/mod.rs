//! # State Module
//!
//! Manages application state for the board.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌────────────────────────┐  ┌────────────────┐  │
//! │  │   BoardState     │  │ TransitionOrchestrator │  │  ConfigState   │  │
//! │  │                  │  │                        │  │                │  │
//! │  │  Arc<Mutex<      │  │  Pacer (enter/settle)  │  │  data_dir      │  │
//! │  │    Board         │◄─│  LaneQuantityRule      │  │  delays        │  │
//! │  │  >>              │  │                        │  │  export_file   │  │
//! │  └──────────────────┘  └────────────────────────┘  └────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • BoardState: Protected by Arc<tokio::sync::Mutex<T>>                 │
//! │  • TransitionOrchestrator: Stateless apart from its pacer              │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod board;
mod config;
pub mod transition;

pub use board::{Board, BoardSnapshot, BoardState};
pub use config::ConfigState;
pub use transition::{
    DropOutcome, Immediate, Pacer, PacingPhase, TimerPacer, TransitionOrchestrator,
};
