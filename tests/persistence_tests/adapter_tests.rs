//! Tests for FlatFileAdapter
//!
//! These tests verify:
//! - Loading from absent and empty files
//! - Save then load reproduces the store
//! - Permissive mode skips malformed lines and keeps the rest
//! - Strict mode fails on the first malformed line
//! - Saves overwrite previous contents
//! - Lines whose text quote handling would change
//! - Path accessors

use std::fs;

use citylib::config::{Config, LoadMode, SyncStrategy};
use citylib::error::{DecodeError, LibraryError};
use citylib::model::{Book, Member};
use citylib::persistence::FlatFileAdapter;
use citylib::store::RecordStore;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_adapter(mode: LoadMode) -> (TempDir, Config, FlatFileAdapter) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .load_mode(mode)
        .sync_strategy(SyncStrategy::EverySave)
        .build();
    let adapter = FlatFileAdapter::new(&config);
    (temp_dir, config, adapter)
}

fn sample_store() -> RecordStore {
    let mut store = RecordStore::new();
    store.insert_book(Book::new(1, "Dune", "Frank Herbert", "Fiction"));
    store.insert_book(Book::with_issued(2, "Emma", "Jane Austen", "Classic", true));
    store.insert_book(Book::new(3, "War, and Peace", "Leo \"L\" Tolstoy", "Classic"));

    let mut ada = Member::new(10, "Ada", "ada@example.com");
    ada.push_issued(2);
    ada.push_issued(2);
    store.insert_member(ada);
    store.insert_member(Member::new(11, "Bob", ""));
    store
}

// =============================================================================
// Empty Load Tests
// =============================================================================

#[test]
fn test_load_absent_files() {
    let (_temp, _config, adapter) = setup_adapter(LoadMode::Strict);

    let (store, report) = adapter.load().unwrap();

    assert!(store.is_empty());
    assert!(!report.books.found);
    assert!(!report.members.found);
    assert_eq!(report.loaded(), 0);
}

#[test]
fn test_load_empty_files() {
    let (_temp, config, adapter) = setup_adapter(LoadMode::Strict);
    fs::write(config.books_path(), "").unwrap();
    fs::write(config.members_path(), "").unwrap();

    let (store, report) = adapter.load().unwrap();

    assert!(store.is_empty());
    assert!(report.books.found);
    assert!(report.members.found);
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_save_then_load_round_trip() {
    let (_temp, _config, adapter) = setup_adapter(LoadMode::Strict);
    let original = sample_store();

    adapter.save(&original).unwrap();
    let (loaded, report) = adapter.load().unwrap();

    assert_eq!(report.books.loaded, 3);
    assert_eq!(report.members.loaded, 2);
    let original_books: Vec<&Book> = original.books().collect();
    let loaded_books: Vec<&Book> = loaded.books().collect();
    assert_eq!(original_books, loaded_books);
    let original_members: Vec<&Member> = original.members().collect();
    let loaded_members: Vec<&Member> = loaded.members().collect();
    assert_eq!(original_members, loaded_members);
}

#[test]
fn test_saved_file_layout() {
    let (_temp, config, adapter) = setup_adapter(LoadMode::Permissive);
    let mut store = RecordStore::new();
    store.insert_book(Book::new(1, "Dune", "Frank Herbert", "Fiction"));
    let mut ada = Member::new(5, "Ada", "ada@example.com");
    ada.push_issued(1);
    store.insert_member(ada);

    adapter.save(&store).unwrap();

    assert_eq!(
        fs::read_to_string(config.books_path()).unwrap(),
        "1,Dune,Frank Herbert,Fiction,false\n"
    );
    assert_eq!(
        fs::read_to_string(config.members_path()).unwrap(),
        "5,Ada,ada@example.com,1\n"
    );
}

#[test]
fn test_save_overwrites_previous_contents() {
    let (_temp, config, adapter) = setup_adapter(LoadMode::Permissive);
    adapter.save(&sample_store()).unwrap();

    let mut smaller = RecordStore::new();
    smaller.insert_book(Book::new(99, "Only", "One", "Book"));
    adapter.save(&smaller).unwrap();

    assert_eq!(
        fs::read_to_string(config.books_path()).unwrap(),
        "99,Only,One,Book,false\n"
    );
    assert_eq!(fs::read_to_string(config.members_path()).unwrap(), "");
}

#[test]
fn test_load_legacy_file() {
    let (_temp, config, adapter) = setup_adapter(LoadMode::Strict);
    fs::write(
        config.books_path(),
        "1,Dune,Frank Herbert,Fiction,false\n2,Emma,Jane Austen,Classic,true\n",
    )
    .unwrap();
    fs::write(config.members_path(), "7,Ada,ada@example.com,2\n").unwrap();

    let (store, _report) = adapter.load().unwrap();

    assert!(store.book(2).unwrap().issued);
    assert_eq!(store.member(7).unwrap().issued_books, vec![2]);
}

// =============================================================================
// Malformed Line Tests
// =============================================================================

#[test]
fn test_permissive_skips_bad_lines_and_keeps_going() {
    let (_temp, config, adapter) = setup_adapter(LoadMode::Permissive);
    fs::write(
        config.books_path(),
        "1,Dune,Herbert,Fiction,false\nnot-a-book\n3,Emma,Austen,Classic,true\n",
    )
    .unwrap();
    fs::write(
        config.members_path(),
        "x,Ada,ada@example.com\n8,Bob,bob@example.com,3\n",
    )
    .unwrap();

    let (store, report) = adapter.load().unwrap();

    assert_eq!(report.books.loaded, 2);
    assert_eq!(report.books.skipped, 1);
    assert_eq!(report.members.loaded, 1);
    assert_eq!(report.members.skipped, 1);
    assert_eq!(report.skipped(), 2);
    assert!(store.book(1).is_some());
    assert!(store.book(3).is_some());
    assert!(store.member(8).is_some());
}

#[test]
fn test_strict_fails_on_bad_line() {
    let (_temp, config, adapter) = setup_adapter(LoadMode::Strict);
    fs::write(
        config.books_path(),
        "1,Dune,Herbert,Fiction,false\n2,Emma,Austen\n",
    )
    .unwrap();

    let err = adapter.load().unwrap_err();

    match err {
        LibraryError::MalformedRecord { file, line, .. } => {
            assert_eq!(file, config.books_path());
            assert_eq!(line, 2);
        }
        other => panic!("Expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_blank_lines_are_ignored() {
    let (_temp, config, adapter) = setup_adapter(LoadMode::Strict);
    fs::write(config.books_path(), "1,Dune,Herbert,Fiction,false\n\n\n").unwrap();

    let (store, report) = adapter.load().unwrap();

    assert_eq!(store.book_count(), 1);
    assert_eq!(report.books.skipped, 0);
}

#[test]
fn test_duplicate_ids_last_line_wins() {
    let (_temp, config, adapter) = setup_adapter(LoadMode::Strict);
    fs::write(
        config.books_path(),
        "1,First,A,C,false\n1,Second,B,D,true\n",
    )
    .unwrap();

    let (store, _report) = adapter.load().unwrap();

    assert_eq!(store.book_count(), 1);
    assert_eq!(store.book(1).unwrap().title, "Second");
}

#[test]
fn test_member_trailing_comma_loads() {
    let (_temp, config, adapter) = setup_adapter(LoadMode::Strict);
    fs::write(config.members_path(), "1,Ada,a@x,\n2,Bob,b@x,4,\n").unwrap();

    let (store, report) = adapter.load().unwrap();

    assert_eq!(report.members.loaded, 2);
    assert_eq!(report.members.skipped, 0);
    assert!(store.member(1).unwrap().issued_books.is_empty());
    assert_eq!(store.member(2).unwrap().issued_books, vec![4]);
}

// =============================================================================
// Quoted Text Tests
// =============================================================================

const LEADING_QUOTE_LINE: &str = "1,\"Hamlet\" annotated,Shakespeare,Drama,false\n";

#[test]
fn test_strict_rejects_leading_quote_line() {
    let (_temp, config, adapter) = setup_adapter(LoadMode::Strict);
    fs::write(config.books_path(), LEADING_QUOTE_LINE).unwrap();

    let err = adapter.load().unwrap_err();

    match err {
        LibraryError::MalformedRecord { line, source, .. } => {
            assert_eq!(line, 1);
            assert!(matches!(source, DecodeError::AmbiguousQuotes(_)));
        }
        other => panic!("Expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_permissive_reads_leading_quote_line_as_written() {
    let (_temp, config, adapter) = setup_adapter(LoadMode::Permissive);
    fs::write(config.books_path(), LEADING_QUOTE_LINE).unwrap();

    let (store, report) = adapter.load().unwrap();

    assert_eq!(report.books.loaded, 1);
    assert_eq!(report.books.skipped, 0);
    assert_eq!(report.books.plain_reads, 1);
    assert_eq!(report.plain_reads(), 1);
    let book = store.book(1).unwrap();
    assert_eq!(book.title, "\"Hamlet\" annotated");
    assert_eq!(book.author, "Shakespeare");
    assert!(!book.issued);
}

#[test]
fn test_leading_quote_title_survives_save() {
    let (_temp, config, adapter) = setup_adapter(LoadMode::Permissive);
    fs::write(config.books_path(), LEADING_QUOTE_LINE).unwrap();
    let (store, _report) = adapter.load().unwrap();

    adapter.save(&store).unwrap();
    let (reloaded, report) = adapter.load().unwrap();

    assert_eq!(report.plain_reads(), 0);
    assert_eq!(reloaded.book(1).unwrap().title, "\"Hamlet\" annotated");
    assert_eq!(
        fs::read_to_string(config.books_path()).unwrap(),
        "1,\"\"\"Hamlet\"\" annotated\",Shakespeare,Drama,false\n"
    );
}

#[test]
fn test_written_quotes_load_without_plain_reads() {
    let (_temp, _config, adapter) = setup_adapter(LoadMode::Strict);
    adapter.save(&sample_store()).unwrap();

    let (store, report) = adapter.load().unwrap();

    assert_eq!(report.plain_reads(), 0);
    assert_eq!(store.book(3).unwrap().title, "War, and Peace");
    assert_eq!(store.book(3).unwrap().author, "Leo \"L\" Tolstoy");
}

#[test]
fn test_inner_quote_in_bare_field_is_literal() {
    let (_temp, config, adapter) = setup_adapter(LoadMode::Strict);
    fs::write(config.books_path(), "1,Dune,Leo \"L\" Tolstoy,Classic,false\n").unwrap();

    let (store, report) = adapter.load().unwrap();

    assert_eq!(report.plain_reads(), 0);
    assert_eq!(store.book(1).unwrap().author, "Leo \"L\" Tolstoy");
}

// =============================================================================
// Accessor Tests
// =============================================================================

#[test]
fn test_paths_follow_config() {
    let (temp, config, adapter) = setup_adapter(LoadMode::Permissive);

    assert_eq!(adapter.books_path(), config.books_path());
    assert_eq!(adapter.members_path(), config.members_path());
    assert_eq!(adapter.books_path(), temp.path().join("books.txt"));
    assert_eq!(adapter.members_path(), temp.path().join("members.txt"));
}
