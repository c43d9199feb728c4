//! Book service trait definition.

use crate::dto::BookRequest;
use async_trait::async_trait;
use bookshelf_core::{Book, BookId, BookshelfResult, Interface, PageRequest};

/// Book service trait.
#[async_trait]
pub trait BookService: Interface + Send + Sync {
    /// Lists a page of books, served from the cache when possible.
    async fn list_books(&self, page: PageRequest) -> BookshelfResult<Vec<Book>>;

    /// Gets a book by ID, served from the cache when possible.
    async fn get_book(&self, id: BookId) -> BookshelfResult<Book>;

    /// Creates a new book.
    async fn create_book(&self, request: BookRequest) -> BookshelfResult<Book>;

    /// Replaces title, author and year of an existing book.
    ///
    /// The book is loaded before `request` is inspected, so a missing book
    /// is reported as `NotFound` even when the payload failed to decode.
    async fn update_book(
        &self,
        id: BookId,
        request: BookshelfResult<BookRequest>,
    ) -> BookshelfResult<Book>;

    /// Deletes a book.
    async fn delete_book(&self, id: BookId) -> BookshelfResult<()>;

    /// Loads a book from the store, bypassing the cache.
    ///
    /// Fails with `NotFound` when the book does not exist.
    async fn require_book(&self, id: BookId) -> BookshelfResult<Book>;
}
