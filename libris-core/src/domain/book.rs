//! Book domain model

use serde::{Deserialize, Serialize};

/// A catalog entry
///
/// `available` is owned by the lending service: it is false exactly while an
/// open transaction exists for this book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub available: bool,
}

impl Book {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        available: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            available,
        }
    }

    /// Book ids are matched ignoring case; titles and authors are not
    pub fn has_id(&self, id: &str) -> bool {
        ids_match(&self.id, id)
    }
}

/// Case-insensitive identifier comparison used for book lookups
pub fn ids_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_id_match_ignores_case() {
        let book = Book::new("B1", "Dune", "Frank Herbert", true);
        assert!(book.has_id("b1"));
        assert!(book.has_id("B1"));
        assert!(!book.has_id("B10"));
    }
}
