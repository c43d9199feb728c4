//! Pagination extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use bookshelf_core::PageRequest;
use std::convert::Infallible;

/// Query parameters for pagination.
///
/// Kept as raw strings so that garbage values fall back to defaults instead
/// of rejecting the request. When a key repeats, the first value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PaginationQuery {
    /// Reads `limit` and `offset` from a raw query string.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut pagination = Self::default();
        let Some(query) = query else {
            return pagination;
        };

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "limit" => &mut pagination.limit,
                "offset" => &mut pagination.offset,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        pagination
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PaginationQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_query(parts.uri.query()))
    }
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        PageRequest::from_raw(query.limit.as_deref(), query.offset.as_deref())
    }
}
