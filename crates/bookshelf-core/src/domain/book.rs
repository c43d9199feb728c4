//! The `Book` entity.

use crate::BookId;
use serde::{Deserialize, Serialize};

/// A persisted book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identifier.
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
}

/// The mutable fields of a book, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl Book {
    /// Builds a persisted book from its id and fields.
    #[must_use]
    pub fn from_new(id: BookId, fields: NewBook) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            year: fields.year,
        }
    }

    /// Replaces title, author and year. The id never changes.
    pub fn replace_fields(&mut self, fields: NewBook) {
        self.title = fields.title;
        self.author = fields.author;
        self.year = fields.year;
    }
}
