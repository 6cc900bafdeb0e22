//! Member entity

use std::fmt;

use serde::{Deserialize, Serialize};

/// A library member and the books currently lent to them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: i32,
    pub name: String,
    pub email: String,

    /// Ids of issued books, in issue order. Duplicates are allowed.
    pub issued_books: Vec<i32>,
}

impl Member {
    /// Create a member with nothing issued
    pub fn new(id: i32, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            issued_books: Vec::new(),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// Record a book as issued to this member
    pub fn push_issued(&mut self, book_id: i32) {
        self.issued_books.push(book_id);
    }

    /// Remove the first occurrence of `book_id` from the issued list
    ///
    /// Returns `true` if an occurrence was removed.
    pub fn remove_issued(&mut self, book_id: i32) -> bool {
        match self.issued_books.iter().position(|&id| id == book_id) {
            Some(index) => {
                self.issued_books.remove(index);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Member ID: {} | Name: {} | Email: {}",
            self.id, self.name, self.email
        )
    }
}
