//! Error types for CityLib
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using LibraryError
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Unified error type for CityLib operations
#[derive(Debug, Error)]
pub enum LibraryError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // -------------------------------------------------------------------------
    // Persistence Errors
    // -------------------------------------------------------------------------
    #[error("Malformed record at {}:{line}: {source}", .file.display())]
    MalformedRecord {
        file: PathBuf,
        line: u64,
        #[source]
        source: DecodeError,
    },

    // -------------------------------------------------------------------------
    // Catalog Errors
    // -------------------------------------------------------------------------
    #[error("Invalid IDs: book {book_id}, member {member_id}")]
    InvalidIds { book_id: i32, member_id: i32 },

    #[error("Book {0} is already issued")]
    AlreadyIssued(i32),

    #[error("Book not found: {0}")]
    BookNotFound(i32),

    #[error("Member not found: {0}")]
    MemberNotFound(i32),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why a single persisted line could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: &'static str, found: usize },

    #[error("invalid integer in field `{field}`: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("invalid field: {0}")]
    InvalidField(String),

    #[error("quoted fields would change the stored text: {0:?}")]
    AmbiguousQuotes(String),

    #[error("unreadable line: {0}")]
    Unreadable(String),
}
