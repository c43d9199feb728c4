//! Result type aliases for Bookshelf.

use crate::BookshelfError;

/// A specialized `Result` type for Bookshelf operations.
pub type BookshelfResult<T> = Result<T, BookshelfError>;
