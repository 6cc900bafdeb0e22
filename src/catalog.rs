//! Catalog Module
//!
//! The catalog operations, coordinating the record store and its files.
//!
//! ## Responsibilities
//! - Load the record files on open
//! - Add books and members, issue and return books
//! - Search and sort over the books
//! - Rewrite the record files after every mutation

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use crate::command::{Command, Outcome};
use crate::config::Config;
use crate::error::{LibraryError, Result};
use crate::model::{Book, Member};
use crate::persistence::{FlatFileAdapter, LoadReport};
use crate::store::RecordStore;

/// A library catalog backed by two record files
///
/// Single-threaded: every mutating operation takes `&mut self`, runs to
/// completion and rewrites both files before returning.
pub struct Catalog {
    /// Catalog configuration
    config: Config,

    /// Every book and member, owned for the catalog's lifetime
    store: RecordStore,

    /// Reads and writes the record files
    files: FlatFileAdapter,

    /// What happened when the files were loaded
    load_report: LoadReport,
}

impl Catalog {
    /// Open a catalog with the given config
    ///
    /// On startup:
    /// 1. Create the data directory if it doesn't exist
    /// 2. Load both record files (missing files mean an empty catalog)
    pub fn open(config: Config) -> Result<Self> {
        if config.data_dir.exists() && !config.data_dir.is_dir() {
            return Err(LibraryError::Config(format!(
                "data directory {} is not a directory",
                config.data_dir.display()
            )));
        }
        fs::create_dir_all(&config.data_dir)?;

        let files = FlatFileAdapter::new(&config);
        let (store, load_report) = files.load()?;

        if load_report.skipped() > 0 {
            tracing::warn!(
                skipped = load_report.skipped(),
                "Some record lines could not be read and were left out"
            );
        }
        if load_report.plain_reads() > 0 {
            tracing::warn!(
                lines = load_report.plain_reads(),
                "Some record lines were read on plain commas; the next save quotes them"
            );
        }
        tracing::info!(
            books = store.book_count(),
            members = store.member_count(),
            "Catalog opened"
        );

        Ok(Self {
            config,
            store,
            files,
            load_report,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    /// Execute a command
    ///
    /// Routes commands to the matching operation
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::AddBook {
                id,
                title,
                author,
                category,
            } => {
                self.add_book(id, title, author, category)?;
                Ok(Outcome::BookAdded)
            }
            Command::AddMember { id, name, email } => {
                self.add_member(id, name, email)?;
                Ok(Outcome::MemberAdded)
            }
            Command::IssueBook { book_id, member_id } => {
                self.issue_book(book_id, member_id)?;
                Ok(Outcome::BookIssued)
            }
            Command::ReturnBook { book_id, member_id } => {
                self.return_book(book_id, member_id)?;
                Ok(Outcome::BookReturned)
            }
            Command::SearchBooks { keyword } => Ok(Outcome::Books(
                self.search_books(&keyword).into_iter().cloned().collect(),
            )),
            Command::SortBooks => Ok(Outcome::Books(
                self.sort_books().into_iter().cloned().collect(),
            )),
            Command::Exit => {
                self.save()?;
                Ok(Outcome::Closed)
            }
        }
    }

    // =========================================================================
    // Mutating operations
    // =========================================================================

    /// Add a book that is not issued
    ///
    /// An existing book with the same id is replaced.
    pub fn add_book(
        &mut self,
        id: i32,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<()> {
        if self
            .store
            .insert_book(Book::new(id, title, author, category))
            .is_some()
        {
            tracing::debug!(book_id = id, "Replaced existing book");
        }
        self.save()
    }

    /// Add a member with nothing issued
    ///
    /// An existing member with the same id is replaced.
    pub fn add_member(
        &mut self,
        id: i32,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<()> {
        if self.store.insert_member(Member::new(id, name, email)).is_some() {
            tracing::debug!(member_id = id, "Replaced existing member");
        }
        self.save()
    }

    /// Lend a book to a member
    ///
    /// Fails without touching the store if either id is unknown or the book
    /// is already issued.
    pub fn issue_book(&mut self, book_id: i32, member_id: i32) -> Result<()> {
        let Some((book, member)) = self.store.book_and_member_mut(book_id, member_id) else {
            return Err(LibraryError::InvalidIds { book_id, member_id });
        };
        if book.issued {
            return Err(LibraryError::AlreadyIssued(book_id));
        }

        book.issued = true;
        member.push_issued(book_id);

        tracing::debug!(book_id, member_id, "Book issued");
        self.save()
    }

    /// Take a book back from a member
    ///
    /// Clears the book's issued flag and removes one occurrence of the book
    /// from the member's list. Whether the book was actually lent to this
    /// member is not checked.
    pub fn return_book(&mut self, book_id: i32, member_id: i32) -> Result<()> {
        if !self.store.contains_book(book_id) {
            return Err(LibraryError::BookNotFound(book_id));
        }
        let Some((book, member)) = self.store.book_and_member_mut(book_id, member_id) else {
            return Err(LibraryError::MemberNotFound(member_id));
        };

        book.issued = false;
        if !member.remove_issued(book_id) {
            tracing::warn!(book_id, member_id, "Returned book was not on the member's list");
        }

        tracing::debug!(book_id, member_id, "Book returned");
        self.save()
    }

    /// Rewrite both record files from the current store
    pub fn save(&self) -> Result<()> {
        self.files.save(&self.store)
    }

    /// Flush and close the catalog
    pub fn close(self) -> Result<()> {
        self.save()?;
        tracing::info!("Catalog closed");
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Books whose title, author or category contains `keyword`, ignoring case
    ///
    /// Results keep store order. An empty keyword matches every book.
    pub fn search_books(&self, keyword: &str) -> Vec<&Book> {
        search(self.store.books(), keyword)
    }

    /// All books ordered by title, ignoring case
    ///
    /// Books with equal titles keep store order. The store itself is not
    /// reordered.
    pub fn sort_books(&self) -> Vec<&Book> {
        sorted_by_title(self.store.books())
    }

    pub fn book(&self, id: i32) -> Option<&Book> {
        self.store.book(id)
    }

    pub fn member(&self, id: i32) -> Option<&Member> {
        self.store.member(id)
    }

    /// All books in store order
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.store.books()
    }

    /// All members in store order
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.store.members()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the underlying record store
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Get the report from the initial load
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// =============================================================================
// Search and ordering
// =============================================================================

/// Case-insensitive comparison of two titles
///
/// Compares character by character after lowercasing, so `"apple"` sorts
/// before `"Mango"`.
pub fn compare_titles(a: &Book, b: &Book) -> Ordering {
    let left = a.title.chars().flat_map(char::to_lowercase);
    let right = b.title.chars().flat_map(char::to_lowercase);
    left.cmp(right)
}

/// Filter `books` down to those matching `keyword`, keeping their order
pub fn search<'a>(books: impl IntoIterator<Item = &'a Book>, keyword: &str) -> Vec<&'a Book> {
    let keyword = keyword.to_lowercase();
    books
        .into_iter()
        .filter(|book| contains_lowered(book, &keyword))
        .collect()
}

/// Substring match over title, author and category; `lowered` is already lowercase
fn contains_lowered(book: &Book, lowered: &str) -> bool {
    [&book.title, &book.author, &book.category]
        .iter()
        .any(|field| field.to_lowercase().contains(lowered))
}

/// Collect `books` into a stable title-ordered view
pub fn sorted_by_title<'a>(books: impl IntoIterator<Item = &'a Book>) -> Vec<&'a Book> {
    let mut sorted: Vec<&Book> = books.into_iter().collect();
    sorted.sort_by(|a, b| compare_titles(a, b));
    sorted
}
