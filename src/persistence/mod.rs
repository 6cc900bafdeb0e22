//! Persistence Module
//!
//! Round-trips the record store through two flat text files.
//!
//! ## Responsibilities
//! - Encode/decode one entity per line
//! - Load both files at startup (missing files mean an empty catalog)
//! - Rewrite both files wholesale on every save
//!
//! ## File Format
//! ```text
//! books.txt     id,title,author,category,issued     (issued = true|false)
//! members.txt   id,name,email[,issuedBookId]*
//! ```
//!
//! No header row, no versioning. Fields holding a comma, a double quote or
//! a line break are written in RFC 4180 double quotes; every other field is
//! written bare, so ordinary files are plain comma-separated text.
//!
//! Bare lines with a field that starts with `"` (`1,"Hamlet" annotated,...`)
//! would lose text under quote handling. Such lines are detected on load:
//! permissive loads read them on plain commas and log a warning, strict
//! loads fail with `MalformedRecord`.
//!
//! Saves truncate and rewrite in place (no temp file + rename): a crash
//! mid-write can leave a truncated file behind.

mod codec;
mod adapter;

pub use codec::{
    decode_book, decode_member, encode_member, quoting_changed_text, split_plain, write_books,
    write_members,
    BOOK_FIELDS, DELIMITER, MEMBER_MIN_FIELDS,
};
pub use adapter::{FileReport, FlatFileAdapter, LoadReport};
