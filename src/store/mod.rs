//! Record Store Module
//!
//! In-memory authoritative collection of books and members.
//!
//! ## Responsibilities
//! - Hold every entity for the lifetime of the catalog
//! - Keyed lookup by integer identifier
//! - Full scans for search, sort and save
//!
//! ## Data Structure Choice
//! Two BTreeMaps keyed by id:
//! - Insert overwrites silently (last write wins)
//! - Enumeration is in ascending id order, so scans and saved files are
//!   deterministic across runs

mod table;

pub use table::RecordStore;
