//! Record codec
//!
//! Line-level encoding and decoding of books and members.
//!
//! ## Line Layout
//! - Book:   exactly 5 fields, `id,title,author,category,issued`
//! - Member: 3 fixed fields then a variable tail, `id,name,email,b1,b2,...`
//!
//! Books go through serde (fixed shape). Members are built field by field
//! because of the variable-length tail.

use std::io::Write;

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::error::{DecodeError, Result};
use crate::model::{Book, Member};

/// Field separator for both files
pub const DELIMITER: u8 = b',';

/// Number of fields on a book line
pub const BOOK_FIELDS: usize = 5;

/// Number of fixed fields on a member line (before the issued ids)
pub const MEMBER_MIN_FIELDS: usize = 3;

// =============================================================================
// Reader / Writer Setup
// =============================================================================

/// Reader settings shared by both files: no header, variable field counts
pub(crate) fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true);
    builder
}

/// Writer settings shared by both files: no header, `\n` line endings
fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'));
    builder
}

// =============================================================================
// Encoding
// =============================================================================

/// Write every book as one line
pub fn write_books<'a, W, I>(out: W, books: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Book>,
{
    let mut writer = writer_builder().from_writer(out);
    for book in books {
        writer.serialize(book)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write every member as one line
pub fn write_members<'a, W, I>(out: W, members: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Member>,
{
    let mut writer = writer_builder().from_writer(out);
    for member in members {
        writer.write_record(&encode_member(member))?;
    }
    writer.flush()?;
    Ok(())
}

/// Flatten a member into its persisted fields
pub fn encode_member(member: &Member) -> StringRecord {
    let mut record = StringRecord::new();
    record.push_field(&member.id().to_string());
    record.push_field(&member.name);
    record.push_field(&member.email);
    for book_id in &member.issued_books {
        record.push_field(&book_id.to_string());
    }
    record
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode one book line
///
/// The issued flag is `true` in any letter case; anything else (including
/// an empty field) reads as not issued.
pub fn decode_book(record: &StringRecord) -> std::result::Result<Book, DecodeError> {
    if record.len() != BOOK_FIELDS {
        return Err(DecodeError::FieldCount {
            expected: "5",
            found: record.len(),
        });
    }

    record
        .deserialize::<Book>(None)
        .map_err(|e| DecodeError::InvalidField(e.to_string()))
}

/// Decode one member line
pub fn decode_member(record: &StringRecord) -> std::result::Result<Member, DecodeError> {
    if record.len() < MEMBER_MIN_FIELDS {
        return Err(DecodeError::FieldCount {
            expected: "at least 3",
            found: record.len(),
        });
    }

    let id = parse_id("id", &record[0])?;
    let mut member = Member::new(id, &record[1], &record[2]);

    // Empty fields at the end of the line (`1,Ada,a@x,`) are dropped, not
    // parsed; an empty field between two ids is still an error.
    let tail: Vec<&str> = record.iter().skip(MEMBER_MIN_FIELDS).collect();
    let used = tail.iter().rposition(|raw| !raw.is_empty()).map_or(0, |i| i + 1);
    for raw in &tail[..used] {
        member.push_issued(parse_id("issued book id", raw)?);
    }

    Ok(member)
}

// =============================================================================
// Plain Lines
// =============================================================================

/// Whether reading `raw` with quote handling lost text
///
/// Files may hold bare lines whose fields happen to start with `"`
/// (`1,"Hamlet" annotated,...`). Quote handling turns those into different
/// text. A line is flagged when it holds a `"`, is not what the writer would
/// produce for the parsed fields, and does not split into the same fields
/// on plain commas.
pub fn quoting_changed_text(raw: &[u8], record: &StringRecord) -> bool {
    if !raw.contains(&b'"') {
        return false;
    }

    let plain = split_plain(raw);
    if plain.iter().eq(record.iter()) {
        return false;
    }

    let mut writer = writer_builder().from_writer(Vec::with_capacity(raw.len() + 1));
    if writer.write_record(record).is_err() {
        return true;
    }
    let Ok(written) = writer.into_inner() else {
        return true;
    };
    trim_terminator(&written) != raw
}

/// Split a line on every delimiter, ignoring quotes
pub fn split_plain(raw: &[u8]) -> StringRecord {
    let text = String::from_utf8_lossy(raw);
    text.split(char::from(DELIMITER)).collect()
}

/// Strip trailing `\r` / `\n` bytes
pub(crate) fn trim_terminator(raw: &[u8]) -> &[u8] {
    let end = raw
        .iter()
        .rposition(|&b| b != b'\n' && b != b'\r')
        .map_or(0, |i| i + 1);
    &raw[..end]
}

fn parse_id(field: &'static str, raw: &str) -> std::result::Result<i32, DecodeError> {
    raw.parse().map_err(|_| DecodeError::InvalidInteger {
        field,
        value: raw.to_string(),
    })
}
