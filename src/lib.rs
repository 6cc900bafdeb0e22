//! # CityLib
//!
//! A small library catalog manager with:
//! - Books and members keyed by integer id
//! - Issue/return bookkeeping between them
//! - Case-insensitive search and title ordering
//! - Flat comma-separated record files, rewritten after every change
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              CLI / Interactive Menu (Shell)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Catalog                                 │
//! │     add / issue / return / search / sort, then save          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌───────────────┐
//!   │ RecordStore │          │FlatFileAdapter│
//!   │ (BTreeMaps) │          │ books.txt     │
//!   └─────────────┘          │ members.txt   │
//!                            └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod store;
pub mod persistence;
pub mod command;
pub mod catalog;
pub mod shell;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LibraryError, Result};
pub use config::Config;
pub use catalog::Catalog;
pub use model::{Book, Member};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of CityLib
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
