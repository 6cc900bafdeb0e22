//! Book entity

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A book in the catalog
///
/// Field order matches the persisted line layout:
/// `id,title,author,category,issued`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: i32,
    pub title: String,
    pub author: String,
    pub category: String,
    #[serde(deserialize_with = "lenient_flag")]
    pub issued: bool,
}

/// `true` in any letter case is issued; every other value reads as not issued
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.eq_ignore_ascii_case("true"))
}

impl Book {
    /// Create a book that is not issued
    pub fn new(
        id: i32,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self::with_issued(id, title, author, category, false)
    }

    /// Create a book with an explicit issued flag (used when loading)
    pub fn with_issued(
        id: i32,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        issued: bool,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            category: category.into(),
            issued,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | {} | {} | {} | Issued: {}",
            self.id, self.title, self.author, self.category, self.issued
        )
    }
}
