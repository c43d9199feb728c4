//! Raw request body extractor with JSON rejections.

use crate::extractors::INVALID_JSON_MESSAGE;
use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bookshelf_core::ErrorResponse;

/// Message returned when a body exceeds `server.max_body_size`.
pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body too large";

/// Buffered request body.
///
/// Decoding is left to the handler so that existence checks can run first.
#[derive(Debug, Clone, Default)]
pub struct BookBody(pub Bytes);

/// Rejection for a body that could not be buffered.
#[derive(Debug)]
pub struct BodyRejection(pub BytesRejection);

impl BodyRejection {
    fn message(status: StatusCode) -> &'static str {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            BODY_TOO_LARGE_MESSAGE
        } else {
            INVALID_JSON_MESSAGE
        }
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let status = self.0.status();
        tracing::debug!(status = status.as_u16(), error = %self.0, "Rejected request body");

        (status, Json(ErrorResponse::new(Self::message(status)))).into_response()
    }
}

#[async_trait]
impl<S> FromRequest<S> for BookBody
where
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Bytes::from_request(req, state).await.map(Self).map_err(BodyRejection)
    }
}
