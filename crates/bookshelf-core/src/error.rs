//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Message returned to clients for infrastructure failures.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Unified error type for all layers of Bookshelf.
#[derive(Error, Debug)]
pub enum BookshelfError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error (malformed body, empty field, bad year)
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Event publication error
    #[error("Publish error: {0}")]
    Publish(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ============ Internal Errors ============
    /// Internal error whose message is safe to show to clients
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BookshelfError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Database(_)
            | Self::Cache(_)
            | Self::Publish(_)
            | Self::Configuration(_)
            | Self::Timeout(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns the message shown to API clients.
    ///
    /// Driver and connection details stay in the logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound { resource_type, .. } => format!("{resource_type} not found"),
            Self::Validation(message) | Self::Internal(message) => message.clone(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for the not-found condition.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for BookshelfError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "Book",
                id: "unknown".to_string(),
            },
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for BookshelfError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error body: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `BookshelfError`.
    #[must_use]
    pub fn from_error(error: &BookshelfError) -> Self {
        Self {
            error: error.public_message(),
        }
    }

    /// Creates an error response with an explicit message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl From<&BookshelfError> for ErrorResponse {
    fn from(error: &BookshelfError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(BookshelfError::not_found("Book", 1).status_code(), 404);
        assert_eq!(BookshelfError::validation("Title cannot be empty").status_code(), 400);
        assert_eq!(BookshelfError::Database("db error".to_string()).status_code(), 500);
        assert_eq!(BookshelfError::internal("oops").status_code(), 500);
        assert_eq!(BookshelfError::Timeout("slow".to_string()).status_code(), 500);
    }

    #[test]
    fn test_public_message_hides_infrastructure_details() {
        let err = BookshelfError::Database("connection refused on 10.0.0.5:3306".to_string());
        assert_eq!(err.public_message(), "Internal server error");

        let err = BookshelfError::internal("Failed to create book");
        assert_eq!(err.public_message(), "Failed to create book");
    }

    #[test]
    fn test_not_found_public_message() {
        let err = BookshelfError::not_found("Book", 42);
        assert_eq!(err.public_message(), "Book not found");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("42"));
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: BookshelfError = sqlx::Error::RowNotFound.into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_response_shape() {
        let err = BookshelfError::validation("Author cannot be empty");
        let response = ErrorResponse::from_error(&err);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Author cannot be empty"}));
    }
}
