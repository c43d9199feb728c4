//! Repository trait definitions.

use bookshelf_core::{Book, BookId, BookshelfResult, Interface, NewBook, PageRequest};
use async_trait::async_trait;

/// Book store trait.
///
/// The store is the source of truth. Absence on lookup is `Ok(None)`;
/// absence on `save` or `delete` is `BookshelfError::NotFound`.
#[async_trait]
pub trait BookRepository: Interface + Send + Sync {
    /// Finds a page of books ordered by id ascending.
    async fn find_all(&self, page: PageRequest) -> BookshelfResult<Vec<Book>>;

    /// Finds a book by ID.
    async fn find_by_id(&self, id: BookId) -> BookshelfResult<Option<Book>>;

    /// Inserts a new book and returns it with the assigned id.
    async fn insert(&self, book: &NewBook) -> BookshelfResult<Book>;

    /// Replaces title, author and year of an existing book.
    async fn save(&self, book: &Book) -> BookshelfResult<Book>;

    /// Deletes a book by ID.
    async fn delete(&self, id: BookId) -> BookshelfResult<()>;
}
