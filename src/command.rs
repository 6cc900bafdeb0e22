//! Command definitions
//!
//! Catalog requests and their results, plus the numbered menu that maps
//! onto them.

use std::fmt;
use std::str::FromStr;

use crate::model::Book;

/// A parsed catalog request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add (or replace) a book
    AddBook {
        id: i32,
        title: String,
        author: String,
        category: String,
    },

    /// Add (or replace) a member
    AddMember { id: i32, name: String, email: String },

    /// Lend a book to a member
    IssueBook { book_id: i32, member_id: i32 },

    /// Take a book back from a member
    ReturnBook { book_id: i32, member_id: i32 },

    /// Case-insensitive search over title, author and category
    SearchBooks { keyword: String },

    /// List every book ordered by title
    SortBooks,

    /// Flush and stop
    Exit,
}

/// Result of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    BookAdded,
    MemberAdded,
    BookIssued,
    BookReturned,

    /// Books produced by a search or sort, in result order
    Books(Vec<Book>),

    /// Catalog flushed on exit
    Closed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::BookAdded => write!(f, "Book added!"),
            Outcome::MemberAdded => write!(f, "Member added!"),
            Outcome::BookIssued => write!(f, "Book issued!"),
            Outcome::BookReturned => write!(f, "Book returned!"),
            Outcome::Books(books) => {
                for (i, book) in books.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", book)?;
                }
                Ok(())
            }
            Outcome::Closed => write!(f, "Goodbye!"),
        }
    }
}

// =============================================================================
// Menu
// =============================================================================

/// One entry of the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MenuChoice {
    AddBook = 1,
    AddMember = 2,
    IssueBook = 3,
    ReturnBook = 4,
    SearchBooks = 5,
    SortBooks = 6,
    Exit = 7,
}

impl MenuChoice {
    /// Every choice in menu order
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::AddBook,
        MenuChoice::AddMember,
        MenuChoice::IssueBook,
        MenuChoice::ReturnBook,
        MenuChoice::SearchBooks,
        MenuChoice::SortBooks,
        MenuChoice::Exit,
    ];

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddBook => "Add Book",
            MenuChoice::AddMember => "Add Member",
            MenuChoice::IssueBook => "Issue Book",
            MenuChoice::ReturnBook => "Return Book",
            MenuChoice::SearchBooks => "Search Books",
            MenuChoice::SortBooks => "Sort Books",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MenuChoice {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        MenuChoice::ALL
            .into_iter()
            .find(|choice| choice.number() == value)
            .ok_or(value)
    }
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u8>()
            .ok()
            .and_then(|n| MenuChoice::try_from(n).ok())
            .ok_or_else(|| trimmed.to_string())
    }
}
