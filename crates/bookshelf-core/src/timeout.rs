//! Timeout wrapper for outbound calls.

use crate::BookshelfError;
use std::future::Future;
use std::time::Duration;

/// Default bound for a single store or cache call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Wraps an async operation with a timeout.
///
/// An elapsed timer becomes [`BookshelfError::Timeout`].
pub async fn with_timeout<F, Fut, T>(duration: Duration, f: F) -> Result<T, BookshelfError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, BookshelfError>>,
{
    tokio::time::timeout(duration, f())
        .await
        .map_err(|_| BookshelfError::Timeout(format!("Operation timed out after {duration:?}")))?
}
