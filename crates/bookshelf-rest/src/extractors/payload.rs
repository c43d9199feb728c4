//! Request body decoding for book payloads.
//!
//! Handlers decode the raw body themselves; a failed decode is reported only
//! after any existence check.
//! The `Content-Type` header is not consulted.

use bookshelf_core::BookshelfError;
use bookshelf_service::BookRequest;
use axum::body::Bytes;

/// Message returned for bodies that do not decode into a book payload.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON data";

/// Decodes a book payload. Unknown fields, including `id`, are ignored.
pub fn decode_book_request(body: &Bytes) -> Result<BookRequest, BookshelfError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        BookshelfError::validation(INVALID_JSON_MESSAGE)
    })
}
