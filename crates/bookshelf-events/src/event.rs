//! Book events.

use bookshelf_core::{Book, BookId, BookshelfResult, DomainEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookEventKind {
    Created,
    Updated,
    Deleted,
}

impl BookEventKind {
    /// Returns the wire name of the event kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "book_created",
            Self::Updated => "book_updated",
            Self::Deleted => "book_deleted",
        }
    }
}

impl fmt::Display for BookEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification about a successful book mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEvent {
    pub kind: BookEventKind,
    pub book_id: BookId,
    /// Human-readable summary, e.g. `New book added: Dune`.
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

impl BookEvent {
    /// A book was created.
    #[must_use]
    pub fn created(book: &Book) -> Self {
        Self::new(BookEventKind::Created, book.id, format!("New book added: {}", book.title))
    }

    /// A book was updated.
    #[must_use]
    pub fn updated(book: &Book) -> Self {
        Self::new(BookEventKind::Updated, book.id, format!("Book updated: {}", book.title))
    }

    /// A book was deleted.
    #[must_use]
    pub fn deleted(id: BookId) -> Self {
        Self::new(BookEventKind::Deleted, id, format!("Book deleted: {id}"))
    }

    fn new(kind: BookEventKind, book_id: BookId, message: String) -> Self {
        Self {
            kind,
            book_id,
            message,
            occurred_at: Utc::now(),
        }
    }
}

impl DomainEvent for BookEvent {
    fn event_type(&self) -> &'static str {
        self.kind.as_str()
    }

    fn aggregate_id(&self) -> String {
        self.book_id.to_string()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn to_json(&self) -> BookshelfResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
