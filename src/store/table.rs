//! RecordStore implementation

use std::collections::BTreeMap;

use crate::model::{Book, Member};

/// In-memory mapping of books and members by id
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    books: BTreeMap<i32, Book>,
    members: BTreeMap<i32, Member>,
}

impl RecordStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Books
    // =========================================================================

    /// Insert a book, returning the entry it replaced (if any)
    pub fn insert_book(&mut self, book: Book) -> Option<Book> {
        self.books.insert(book.id(), book)
    }

    pub fn book(&self, id: i32) -> Option<&Book> {
        self.books.get(&id)
    }

    pub fn book_mut(&mut self, id: i32) -> Option<&mut Book> {
        self.books.get_mut(&id)
    }

    pub fn contains_book(&self, id: i32) -> bool {
        self.books.contains_key(&id)
    }

    /// All books in ascending id order
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Insert a member, returning the entry it replaced (if any)
    pub fn insert_member(&mut self, member: Member) -> Option<Member> {
        self.members.insert(member.id(), member)
    }

    pub fn member(&self, id: i32) -> Option<&Member> {
        self.members.get(&id)
    }

    pub fn member_mut(&mut self, id: i32) -> Option<&mut Member> {
        self.members.get_mut(&id)
    }

    pub fn contains_member(&self, id: i32) -> bool {
        self.members.contains_key(&id)
    }

    /// All members in ascending id order
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Mutable access to a book and a member at once
    ///
    /// `None` if either id is unknown.
    pub fn book_and_member_mut(
        &mut self,
        book_id: i32,
        member_id: i32,
    ) -> Option<(&mut Book, &mut Member)> {
        let book = self.books.get_mut(&book_id)?;
        let member = self.members.get_mut(&member_id)?;
        Some((book, member))
    }

    // =========================================================================
    // Whole store
    // =========================================================================

    /// Check if the store holds no entities at all
    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.members.is_empty()
    }

    /// Drop every entity
    pub fn clear(&mut self) {
        self.books.clear();
        self.members.clear();
    }
}
