//! # Stockpile Board Library
//!
//! Core library for the Stockpile inventory board.
//! This is the main entry point that configures state and runs a command.
//!
//! ## Module Organization
//! ```text
//! stockpile_board/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── Command-line arguments
//! ├── render.rs       ◄─── Table output
//! ├── state/
//! │   ├── mod.rs        ◄─── State type exports
//! │   ├── board.rs      ◄─── Board controller + shared handle
//! │   ├── transition.rs ◄─── Paced lane changes
//! │   └── config.rs     ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── board.rs    ◄─── Snapshot, filters, drops
//! │   ├── product.rs  ◄─── Lookup, add, edit
//! │   ├── transfer.rs ◄─── Export, import, reset, clear
//! │   └── config.rs   ◄─── Config, dark mode, storage health
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────┐ ┌────────────────────────┐ ┌──────────────────┐  │
//! │  │    BoardState    │ │ TransitionOrchestrator │ │   ConfigState    │  │
//! │  │                  │ │                        │ │                  │  │
//! │  │  • Products      │ │  • Enter/settle pacing │ │  • Data dir      │  │
//! │  │  • Filters       │ │  • Lane quantity rule  │ │  • Delays        │  │
//! │  │  • Animating ids │ │                        │ │  • Export file   │  │
//! │  │  • Dark mode     │ │                        │ │                  │  │
//! │  └──────────────────┘ └────────────────────────┘ └──────────────────┘  │
//! │                                                                         │
//! │  Each command only requests the state it needs.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stockpile_core::DropRequest;
use stockpile_store::{FileStore, InventoryStorage, ProductStore};

use cli::{Cli, Command, ThemeArg};
use commands::{board, config as config_cmd, product, transfer};
use error::ApiError;
use state::{Board, BoardState, ConfigState, TransitionOrchestrator};

/// Log filter used when neither `RUST_LOG` nor `-v`/`-q` is given.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Runs one CLI invocation with configuration from the environment.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Invocation                                        │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • STOCKPILE_* variables, --data-dir wins over STOCKPILE_DATA_DIR    │
/// │                                                                         │
/// │  2. Determine Data Directory ─────────────────────────────────────────► │
/// │     • macOS: ~/Library/Application Support/com.stockpile.board          │
/// │     • Windows: %APPDATA%\stockpile\board\data                           │
/// │     • Linux: ~/.local/share/board                                       │
/// │                                                                         │
/// │  3. Initialize Product Store ─────────────────────────────────────────► │
/// │     • Stored snapshot, cleared marker, or sample data                   │
/// │                                                                         │
/// │  4. Dispatch Command ─────────────────────────────────────────────────► │
/// │     • Print result (table or --json)                                    │
/// │     • Print any storage warning to stderr                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    run_with_config(cli, ConfigState::from_env()).await
}

/// Runs one CLI invocation with the given configuration.
pub async fn run_with_config(cli: Cli, mut config: ConfigState) -> Result<(), ApiError> {
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let state = open_board(&config)?;
    let result = dispatch(cli.command, cli.json, &config, &state).await;

    if let Some(warning) = config_cmd::storage_warning(&state).await {
        eprintln!("warning: {warning}");
    }
    result
}

/// Opens the board over the file store in the data directory.
pub fn open_board(config: &ConfigState) -> Result<BoardState, ApiError> {
    let dir = data_dir(config)?;
    info!(dir = %dir.display(), "Opening inventory");

    let backend = FileStore::open(dir)?;
    let store = ProductStore::initialize(InventoryStorage::new(backend));
    Ok(BoardState::new(Board::new(store)))
}

/// Determines the storage directory.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.stockpile.board`
/// - **Windows**: `%APPDATA%\stockpile\board\data`
/// - **Linux**: `~/.local/share/board`
///
/// ## Override
/// `STOCKPILE_DATA_DIR` or `--data-dir`.
pub fn data_dir(config: &ConfigState) -> Result<PathBuf, ApiError> {
    if let Some(dir) = &config.data_dir {
        return Ok(dir.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "stockpile", "board")
        .ok_or_else(|| ApiError::storage("Could not determine app data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `-q` - errors only
/// - `-v` - `info,stockpile=debug`
/// - `-vv` - everything
/// - Otherwise `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so command output stays clean.
pub fn init_tracing(verbose: u8, quiet: bool) {
    let filter = match log_directive(verbose, quiet) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Filter directive implied by `-v`/`-q`, or `None` to defer to `RUST_LOG`.
pub fn log_directive(verbose: u8, quiet: bool) -> Option<&'static str> {
    match (quiet, verbose) {
        (true, _) => Some("error"),
        (false, 0) => None,
        (false, 1) => Some("info,stockpile=debug"),
        (false, _) => Some("trace"),
    }
}

// =============================================================================
// Dispatch
// =============================================================================

async fn dispatch(
    command: Command,
    json: bool,
    config: &ConfigState,
    state: &BoardState,
) -> Result<(), ApiError> {
    match command {
        Command::List(args) => {
            let snapshot = board::set_filters(state, args.filters()).await;
            emit(json, &snapshot, || render::board(&snapshot))
        }
        Command::Summary => {
            let summary = board::get_summary(state).await;
            emit(json, &summary, || render::summary(&summary))
        }
        Command::Show { id } => {
            let product = product::get_product(state, id).await?;
            emit(json, &product, || render::product(&product))
        }
        Command::Add(args) => {
            let product = product::add_product(state, args.into()).await?;
            emit(json, &product, || {
                format!("Added {} (id {}) to {}", product.name, product.id, product.status)
            })
        }
        Command::Edit(args) => {
            let product = product::edit_product(state, args.id, args.patch()).await?;
            emit(json, &product, || render::product(&product))
        }
        Command::Move { id, status } => {
            let orchestrator = TransitionOrchestrator::from_config(config);
            let outcome =
                board::move_product(state, &orchestrator, DropRequest::new(id, status)).await?;
            emit(json, &outcome, || render::drop_outcome(id, status, &outcome))
        }
        Command::Export { out } => {
            let path = transfer::export_to_file(state, config, out.as_deref()).await?;
            let report = serde_json::json!({ "path": path.display().to_string() });
            emit(json, &report, || format!("Exported inventory to {}", path.display()))
        }
        Command::Import { path } => {
            let count = transfer::import_from_file(state, &path).await?;
            let report = serde_json::json!({ "imported": count });
            emit(json, &report, || format!("Imported {count} products"))
        }
        Command::Reset => {
            let count = transfer::reset_inventory(state).await?;
            let report = serde_json::json!({ "products": count });
            emit(json, &report, || format!("Restored {count} sample products"))
        }
        Command::Clear => {
            transfer::clear_inventory(state).await;
            let report = serde_json::json!({ "products": 0 });
            emit(json, &report, || "Inventory cleared".to_string())
        }
        Command::Theme { mode } => {
            let enabled = match mode {
                None => config_cmd::get_dark_mode(state).await,
                Some(ThemeArg::On) => config_cmd::set_dark_mode(state, true).await,
                Some(ThemeArg::Off) => config_cmd::set_dark_mode(state, false).await,
                Some(ThemeArg::Toggle) => config_cmd::toggle_dark_mode(state).await,
            };
            let report = serde_json::json!({ "darkMode": enabled });
            emit(json, &report, || {
                format!("Dark mode: {}", if enabled { "on" } else { "off" })
            })
        }
        Command::Config => {
            let current = config_cmd::get_config(config);
            let dir = data_dir(&current)?;
            emit(json, &current, || render::config(&current, &dir))
        }
        Command::Flush => {
            config_cmd::flush_storage(state).await?;
            let report = serde_json::json!({ "saved": true });
            emit(json, &report, || "All changes saved".to_string())
        }
    }
}

fn emit<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<(), ApiError> {
    if json {
        let out = serde_json::to_string_pretty(value)
            .map_err(|e| ApiError::internal(format!("Could not encode output: {e}")))?;
        println!("{out}");
    } else {
        println!("{}", text());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use crate::error::ErrorCode;
    use std::path::Path;

    fn config(dir: &Path) -> ConfigState {
        ConfigState {
            data_dir: Some(dir.to_path_buf()),
            enter_delay_ms: 0,
            settle_delay_ms: 0,
            ..ConfigState::default()
        }
    }

    async fn run_args(dir: &Path, args: &[&str]) -> Result<(), ApiError> {
        let argv = std::iter::once("stockpile").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        run_with_config(cli, config(dir)).await
    }

    fn reopen(dir: &Path) -> BoardState {
        open_board(&config(dir)).unwrap()
    }

    #[test]
    fn test_log_directive() {
        assert_eq!(log_directive(0, false), None);
        assert_eq!(log_directive(1, false), Some("info,stockpile=debug"));
        assert_eq!(log_directive(3, false), Some("trace"));
        assert_eq!(log_directive(0, true), Some("error"));
    }

    #[test]
    fn test_data_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(data_dir(&config(dir.path())).unwrap(), dir.path());
    }

    #[tokio::test]
    async fn test_cli_session_persists_between_invocations() {
        let dir = tempfile::tempdir().unwrap();

        run_args(dir.path(), &["list"]).await.unwrap();
        run_args(
            dir.path(),
            &["add", "--name", "Webcam", "--category", "Electronics", "--supplier", "Logitech"],
        )
        .await
        .unwrap();
        run_args(dir.path(), &["move", "1", "out-of-stock"]).await.unwrap();
        run_args(dir.path(), &["theme", "toggle"]).await.unwrap();

        let state = reopen(dir.path());
        let (len, status, dark) = state
            .with_board(|b| (b.products().len(), b.get(1).map(|p| p.status), b.dark_mode()))
            .await;
        assert_eq!(len, 9);
        assert_eq!(status, Some(stockpile_core::ProductStatus::OutOfStock));
        assert!(dark);
    }

    #[tokio::test]
    async fn test_cli_clear_export_import() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.json");
        let file_arg = file.display().to_string();

        run_args(dir.path(), &["export", "--out", &file_arg]).await.unwrap();
        run_args(dir.path(), &["clear"]).await.unwrap();
        assert!(reopen(dir.path()).with_board(|b| b.products().is_empty()).await);

        run_args(dir.path(), &["import", &file_arg]).await.unwrap();
        assert_eq!(reopen(dir.path()).with_board(|b| b.products().len()).await, 8);
    }

    #[tokio::test]
    async fn test_cli_errors() {
        let dir = tempfile::tempdir().unwrap();

        let err = run_args(dir.path(), &["show", "404"]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = run_args(dir.path(), &["edit", "1", "--name", " "]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{}").unwrap();
        let err = run_args(dir.path(), &["import", &bad.display().to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFile);
    }

    #[tokio::test]
    async fn test_cli_config_and_flush() {
        let dir = tempfile::tempdir().unwrap();

        run_args(dir.path(), &["config"]).await.unwrap();
        run_args(dir.path(), &["--json", "config"]).await.unwrap();
        run_args(dir.path(), &["flush"]).await.unwrap();
    }
}
