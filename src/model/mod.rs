//! Model Module
//!
//! The two entity types held by the catalog.
//!
//! ## Invariants
//! - An entity's identifier never changes after construction
//! - A book is issued iff its id appears in some member's issued list
//!   (maintained by the catalog's issue/return operations, not checked on load)

mod book;
mod member;

pub use book::Book;
pub use member::Member;
