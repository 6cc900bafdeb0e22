//! Flat file adapter
//!
//! Loads and saves the whole record store through the two record files.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::config::{Config, LoadMode, SyncStrategy};
use crate::error::{DecodeError, LibraryError, Result};
use crate::store::RecordStore;

use super::codec;

/// Per-file load statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileReport {
    /// Lines decoded and inserted into the store
    pub loaded: u64,

    /// Malformed lines that were skipped (permissive mode only)
    pub skipped: u64,

    /// Lines with a stray leading `"` that were read on plain commas
    pub plain_reads: u64,

    /// Whether the file existed at all
    pub found: bool,
}

/// Result of a load operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub books: FileReport,
    pub members: FileReport,
}

impl LoadReport {
    /// Total number of records loaded from both files
    pub fn loaded(&self) -> u64 {
        self.books.loaded + self.members.loaded
    }

    /// Total number of malformed lines skipped in both files
    pub fn skipped(&self) -> u64 {
        self.books.skipped + self.members.skipped
    }

    /// Total number of lines read on plain commas in both files
    pub fn plain_reads(&self) -> u64 {
        self.books.plain_reads + self.members.plain_reads
    }
}

/// Reads and writes the book and member files
///
/// ## Malformed lines
/// By default a bad line is skipped on its own (logged and counted) and
/// loading carries on with the next one. With `LoadMode::Strict` the whole
/// load fails with `MalformedRecord` and no partial store is returned.
#[derive(Debug, Clone)]
pub struct FlatFileAdapter {
    books_path: PathBuf,
    members_path: PathBuf,
    load_mode: LoadMode,
    sync_strategy: SyncStrategy,
}

impl FlatFileAdapter {
    /// Create an adapter for the files named in `config`
    pub fn new(config: &Config) -> Self {
        Self {
            books_path: config.books_path(),
            members_path: config.members_path(),
            load_mode: config.load_mode,
            sync_strategy: config.sync_strategy,
        }
    }

    /// Load both files into a fresh store
    ///
    /// Missing files load as empty. I/O failures other than a missing file
    /// are returned as errors.
    pub fn load(&self) -> Result<(RecordStore, LoadReport)> {
        let mut store = RecordStore::new();

        let books = self.load_file(&self.books_path, codec::decode_book, |book| {
            store.insert_book(book);
        })?;
        let members = self.load_file(&self.members_path, codec::decode_member, |member| {
            store.insert_member(member);
        })?;

        let report = LoadReport { books, members };
        tracing::debug!(
            books = report.books.loaded,
            members = report.members.loaded,
            skipped = report.skipped(),
            "Record files loaded"
        );

        Ok((store, report))
    }

    /// Overwrite both files with the current store contents
    pub fn save(&self, store: &RecordStore) -> Result<()> {
        self.write_file(&self.books_path, |out| {
            codec::write_books(out, store.books())
        })?;
        self.write_file(&self.members_path, |out| {
            codec::write_members(out, store.members())
        })?;

        tracing::debug!(
            books = store.book_count(),
            members = store.member_count(),
            "Record files saved"
        );
        Ok(())
    }

    pub fn books_path(&self) -> &Path {
        &self.books_path
    }

    pub fn members_path(&self) -> &Path {
        &self.members_path
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn load_file<T>(
        &self,
        path: &Path,
        decode: impl Fn(&StringRecord) -> std::result::Result<T, DecodeError>,
        mut insert: impl FnMut(T),
    ) -> Result<FileReport> {
        // Whole file in memory so each record's raw bytes can be checked
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Record file not found, starting empty");
                return Ok(FileReport::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut report = FileReport {
            found: true,
            ..FileReport::default()
        };
        let mut reader = codec::reader_builder().from_reader(bytes.as_slice());
        let mut record = StringRecord::new();

        loop {
            let decoded = match reader.read_record(&mut record) {
                Ok(false) => break,
                Ok(true) => {
                    let line = line_of(record.position());
                    let start = record.position().map_or(0, |p| p.byte() as usize);
                    let end = reader.position().byte() as usize;
                    let raw = codec::trim_terminator(&bytes[start..end]);
                    self.decode_line(path, line, raw, &record, &decode, &mut report)
                        .map_err(|e| (line, e))
                }
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => Err((
                    line_of(e.position()),
                    DecodeError::Unreadable(e.to_string()),
                )),
            };

            match decoded {
                Ok(entity) => {
                    insert(entity);
                    report.loaded += 1;
                }
                Err((line, source)) => self.reject(path, line, source, &mut report)?,
            }
        }

        Ok(report)
    }

    /// Decode one record, falling back to a plain comma split when quote
    /// handling changed the line's text
    fn decode_line<T>(
        &self,
        path: &Path,
        line: u64,
        raw: &[u8],
        record: &StringRecord,
        decode: &impl Fn(&StringRecord) -> std::result::Result<T, DecodeError>,
        report: &mut FileReport,
    ) -> std::result::Result<T, DecodeError> {
        if !codec::quoting_changed_text(raw, record) {
            return decode(record);
        }

        match self.load_mode {
            LoadMode::Strict => Err(DecodeError::AmbiguousQuotes(
                String::from_utf8_lossy(raw).into_owned(),
            )),
            LoadMode::Permissive => {
                tracing::warn!(
                    file = %path.display(),
                    line,
                    "Quoted fields would change this line, reading it on plain commas"
                );
                report.plain_reads += 1;
                decode(&codec::split_plain(raw))
            }
        }
    }

    fn reject(
        &self,
        path: &Path,
        line: u64,
        source: DecodeError,
        report: &mut FileReport,
    ) -> Result<()> {
        match self.load_mode {
            LoadMode::Strict => Err(LibraryError::MalformedRecord {
                file: path.to_path_buf(),
                line,
                source,
            }),
            LoadMode::Permissive => {
                tracing::warn!(
                    file = %path.display(),
                    line,
                    error = %source,
                    "Skipping malformed record"
                );
                report.skipped += 1;
                Ok(())
            }
        }
    }

    fn write_file(&self, path: &Path, write: impl FnOnce(&File) -> Result<()>) -> Result<()> {
        let file = File::create(path)?;
        write(&file)?;

        if self.sync_strategy == SyncStrategy::EverySave {
            file.sync_all()?;
        }

        Ok(())
    }
}

fn line_of(position: Option<&csv::Position>) -> u64 {
    position.map(|p| p.line()).unwrap_or(0)
}
