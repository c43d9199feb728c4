//! Book ID path extractor.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use bookshelf_core::{BookId, BookshelfError};

/// The `:id` segment of a book route.
///
/// A segment that does not decode or is not an integer names a book that
/// cannot exist, so it is rejected as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookPath(pub BookId);

impl BookPath {
    /// Parses a decoded path segment.
    pub fn parse(segment: &str) -> Result<Self, AppError> {
        BookId::parse(segment)
            .map(Self)
            .map_err(|_| AppError(BookshelfError::not_found("Book", segment)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BookPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(segment)) => Self::parse(&segment),
            Err(rejection) => {
                tracing::debug!(path = %parts.uri.path(), error = %rejection, "Rejected book id");
                Err(AppError(BookshelfError::not_found("Book", parts.uri.path())))
            }
        }
    }
}
