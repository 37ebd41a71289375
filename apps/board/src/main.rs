//! # Stockpile Command Line Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        stockpile                                        │
//! │                                                                         │
//! │  main.rs ─────► Parses arguments, sets up logging                       │
//! │                                                                         │
//! │  lib.rs ──────► Loads config, opens the board, dispatches               │
//! │                                                                         │
//! │  commands/ ───► get_board, add_product, move_product, import, ...       │
//! │                                                                         │
//! │  state/ ──────► BoardState, TransitionOrchestrator, ConfigState         │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 <data dir>/*.json (key-value files)              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;
use stockpile_board::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    stockpile_board::init_tracing(cli.verbose, cli.quiet);

    match stockpile_board::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {}", error.message);
            ExitCode::from(1)
        }
    }
}
