//! Redis Streams sink.

use crate::{BookEvent, EventSink};
use async_trait::async_trait;
use bookshelf_core::{with_timeout, BookshelfError, BookshelfResult, DEFAULT_CALL_TIMEOUT};
use deadpool_redis::{Config, Pool, Runtime};
use std::time::Duration;
use tracing::{debug, info};

/// Approximate number of entries retained per stream.
pub const DEFAULT_STREAM_MAX_LEN: usize = 10_000;

/// Create a Redis connection pool for the event log.
///
/// Connections are opened lazily, so an unreachable server does not fail
/// startup. Appends fail instead and are logged by the worker. Waiting for,
/// opening and recycling a connection are each bounded by `timeout`.
pub fn create_pool(url: &str, pool_size: u32, timeout: Duration) -> BookshelfResult<Pool> {
    info!("Creating Redis connection pool for events...");

    let pool = Config::from_url(url)
        .builder()
        .map_err(|e| BookshelfError::Configuration(format!("Invalid Redis config: {e}")))?
        .max_size(pool_size as usize)
        .wait_timeout(Some(timeout))
        .create_timeout(Some(timeout))
        .recycle_timeout(Some(timeout))
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| BookshelfError::Configuration(format!("Failed to create pool: {e}")))?;

    Ok(pool)
}

/// Appends events to a Redis Stream named after the topic.
///
/// Each entry carries the fields `event`, `book_id`, `message` and
/// `occurred_at`. Streams are trimmed with `MAXLEN ~`.
pub struct RedisStreamSink {
    pool: Pool,
    max_len: usize,
    timeout: Duration,
}

impl RedisStreamSink {
    /// Creates a sink over an existing pool.
    #[must_use]
    pub fn new(pool: Pool, max_len: usize) -> Self {
        Self {
            pool,
            max_len: if max_len == 0 { DEFAULT_STREAM_MAX_LEN } else { max_len },
            timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Bounds each append, connection checkout included.
    #[must_use]
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn xadd(&self, topic: &str, event: &BookEvent) -> BookshelfResult<String> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| BookshelfError::Publish(format!("Failed to get Redis connection: {e}")))?;

        redis::cmd("XADD")
            .arg(topic)
            .arg("MAXLEN")
            .arg("~")
            .arg(self.max_len)
            .arg("*")
            .arg("event")
            .arg(event.kind.as_str())
            .arg("book_id")
            .arg(event.book_id.into_inner())
            .arg("message")
            .arg(&event.message)
            .arg("occurred_at")
            .arg(event.occurred_at.to_rfc3339())
            .query_async(&mut *conn)
            .await
            .map_err(|e| BookshelfError::Publish(format!("XADD to '{topic}' failed: {e}")))
    }
}

#[async_trait]
impl EventSink for RedisStreamSink {
    async fn append(&self, topic: &str, event: &BookEvent) -> BookshelfResult<()> {
        let entry_id = with_timeout(self.timeout, || self.xadd(topic, event)).await?;

        debug!(%topic, %entry_id, "Appended event to stream");
        Ok(())
    }
}

impl std::fmt::Debug for RedisStreamSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStreamSink")
            .field("max_len", &self.max_len)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
