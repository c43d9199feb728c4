//! Cache key generators for consistent key naming.

use bookshelf_core::{BookId, PageRequest};

/// Default prefix for all cache keys.
pub const DEFAULT_PREFIX: &str = "bookshelf:cache";

/// Cache key builder.
///
/// Every key that can hold a list of books starts with [`Self::books_pattern`]
/// minus the trailing `*`, so one pattern delete clears all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    prefix: String,
}

impl CacheKeys {
    /// Create a new key builder with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim_end_matches(':').to_string();
        Self { prefix }
    }

    /// Key for a single book.
    #[must_use]
    pub fn book_by_id(&self, id: BookId) -> String {
        format!("{}:book:{}", self.prefix, id)
    }

    /// Key for one page of the book list.
    #[must_use]
    pub fn books_page(&self, page: PageRequest) -> String {
        format!("{}:books:limit={}:offset={}", self.prefix, page.limit(), page.offset())
    }

    /// Pattern matching every book list key.
    #[must_use]
    pub fn books_pattern(&self) -> String {
        format!("{}:books:*", self.prefix)
    }
}

impl Default for CacheKeys {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
