//! Book DTOs.

use bookshelf_core::{BookshelfResult, NewBook, ValidateExt};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Order in which request fields are checked; only the first failure is reported.
const FIELD_ORDER: &[&str] = &["title", "author", "year"];

/// Request body for creating or replacing a book.
///
/// All fields are required. Unknown fields, including `id`, are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BookRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,

    #[validate(length(min = 1, message = "Author cannot be empty"))]
    pub author: String,

    #[validate(range(min = 1, message = "Year must be a valid positive number"))]
    pub year: i32,
}

impl BookRequest {
    /// Validates the request, reporting the first failing field.
    pub fn validate_request(&self) -> BookshelfResult<()> {
        self.validate_in_order(FIELD_ORDER)
    }

    /// Converts the request into the fields of a book.
    #[must_use]
    pub fn into_new_book(self) -> NewBook {
        NewBook {
            title: self.title,
            author: self.author,
            year: self.year,
        }
    }
}
