//! # Board Commands Module
//!
//! All operations exposed to a front end (the `stockpile` CLI, or a UI shell).
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── board.rs    ◄─── Snapshot, filters, summary, drops
//! ├── product.rs  ◄─── Lookup, add, edit
//! ├── transfer.rs ◄─── Export, import, reset, clear
//! └── config.rs   ◄─── Configuration, dark mode, storage warnings
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Front end                                                              │
//! │  ─────────                                                              │
//! │  stockpile edit 4 --quantity 3                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  async fn edit_product(                                                 │
//! │      state: &BoardState,      ◄── Shared board handle                  │
//! │      id: i64,                 ◄── From arguments                       │
//! │      patch: ProductPatch,                                               │
//! │  ) -> Result<Product, ApiError>                                         │
//! │         │                                                               │
//! │         │ (one Board operation under the lock)                          │
//! │         ▼                                                               │
//! │  Front end receives: Product, or ApiError { code, message }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command declares only the state it needs.

pub mod board;
pub mod config;
pub mod product;
pub mod transfer;
