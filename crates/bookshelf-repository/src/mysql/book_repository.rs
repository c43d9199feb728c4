//! MySQL book repository implementation.

use crate::{traits::BookRepository, DatabasePoolInterface};
use async_trait::async_trait;
use bookshelf_core::{Book, BookId, BookshelfError, BookshelfResult, NewBook, PageRequest};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL book repository implementation.
#[derive(Clone)]
pub struct MySqlBookRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlBookRepository {
    /// Creates a new MySQL book repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a book.
#[derive(Debug, FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    year: i32,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: BookId(row.id),
            title: row.title,
            author: row.author,
            year: row.year,
        }
    }
}

#[async_trait]
impl BookRepository for MySqlBookRepository {
    async fn find_all(&self, page: PageRequest) -> BookshelfResult<Vec<Book>> {
        debug!("Finding books, limit: {}, offset: {}", page.limit(), page.offset());

        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, year
            FROM books
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(&self, id: BookId) -> BookshelfResult<Option<Book>> {
        debug!("Finding book by id: {}", id);

        let row = sqlx::query_as::<_, BookRow>(
            "SELECT id, title, author, year FROM books WHERE id = ?",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Book::from))
    }

    async fn insert(&self, book: &NewBook) -> BookshelfResult<Book> {
        debug!("Inserting book: {}", book.title);

        let result = sqlx::query("INSERT INTO books (title, author, year) VALUES (?, ?, ?)")
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.year)
            .execute(self.pool.inner())
            .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|e| BookshelfError::Database(format!("Assigned id out of range: {e}")))?;

        Ok(Book::from_new(BookId(id), book.clone()))
    }

    async fn save(&self, book: &Book) -> BookshelfResult<Book> {
        debug!("Updating book: {}", book.id);

        // MySQL reports changed rows, not matched rows, so re-read instead
        sqlx::query("UPDATE books SET title = ?, author = ?, year = ? WHERE id = ?")
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.year)
            .bind(book.id.into_inner())
            .execute(self.pool.inner())
            .await?;

        self.find_by_id(book.id)
            .await?
            .ok_or_else(|| BookshelfError::not_found("Book", book.id))
    }

    async fn delete(&self, id: BookId) -> BookshelfResult<()> {
        debug!("Deleting book: {}", id);

        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        if result.rows_affected() == 0 {
            return Err(BookshelfError::not_found("Book", id));
        }
        Ok(())
    }
}

impl std::fmt::Debug for MySqlBookRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlBookRepository").finish_non_exhaustive()
    }
}
