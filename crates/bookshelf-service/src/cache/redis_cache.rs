//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use bookshelf_config::RedisConfig;
use bookshelf_core::{
    with_timeout, BookshelfError, BookshelfResult, HealthCheck, HealthStatus, DEFAULT_CALL_TIMEOUT,
};
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use std::time::Duration;
use tracing::{debug, info};

/// Number of keys requested per SCAN round trip.
const SCAN_BATCH: usize = 100;

/// Create the Redis connection pool used by the cache.
///
/// Connections are opened on first use. Waiting for, opening and recycling
/// a connection are each bounded by `timeout`.
pub fn create_cache_pool(config: &RedisConfig, timeout: Duration) -> BookshelfResult<Pool> {
    info!("Creating Redis connection pool for cache...");

    Config::from_url(&config.url)
        .builder()
        .map_err(|e| BookshelfError::Configuration(format!("Invalid Redis config: {e}")))?
        .max_size(config.pool_size as usize)
        .wait_timeout(Some(timeout))
        .create_timeout(Some(timeout))
        .recycle_timeout(Some(timeout))
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| BookshelfError::Cache(format!("Failed to create Redis pool: {e}")))
}

/// Redis-based cache service.
#[derive(Clone)]
pub struct RedisCacheService {
    /// Redis connection pool. `None` when caching is disabled.
    pool: Option<Pool>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Round-trips a `PING`.
    pub async fn ping(&self) -> BookshelfResult<()> {
        let mut conn = self.get_conn().await?;
        deadpool_redis::redis::cmd("PING")
            .query_async::<String>(&mut *conn)
            .await
            .map_err(|e| BookshelfError::Cache(format!("PING failed: {e}")))?;
        Ok(())
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> BookshelfResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                BookshelfError::Cache(format!("Failed to get Redis connection: {e}"))
            }),
            None => Err(BookshelfError::Cache("Cache is disabled".to_string())),
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> BookshelfResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            BookshelfError::Cache(format!("Failed to get key '{key}': {e}"))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> BookshelfResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;

        match ttl {
            Some(ttl) => {
                let ttl_secs = ttl.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
                    BookshelfError::Cache(format!("Failed to set key '{key}': {e}"))
                })?;
                debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
            }
            None => {
                conn.set::<_, _, ()>(key, value).await.map_err(|e| {
                    BookshelfError::Cache(format!("Failed to set key '{key}': {e}"))
                })?;
                debug!("Cached key '{}' without expiration", key);
            }
        }

        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> BookshelfResult<u64> {
        if !self.is_enabled() || keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.get_conn().await?;
        let deleted: u64 = conn.del(keys).await.map_err(|e| {
            BookshelfError::Cache(format!("Failed to delete keys {keys:?}: {e}"))
        })?;

        debug!("Deleted {} of {:?}", deleted, keys);
        Ok(deleted)
    }

    async fn delete_pattern(&self, pattern: &str) -> BookshelfResult<u64> {
        if !self.is_enabled() {
            return Ok(0);
        }

        let mut conn = self.get_conn().await?;
        let mut cursor: u64 = 0;
        let mut deleted: u64 = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = deadpool_redis::redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut *conn)
                .await
                .map_err(|e| BookshelfError::Cache(format!("Failed to scan keys: {e}")))?;

            if !keys.is_empty() {
                let removed: u64 = conn.del(&keys).await.map_err(|e| {
                    BookshelfError::Cache(format!("Failed to delete keys: {e}"))
                })?;
                deleted += removed;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted)
    }
}

#[async_trait]
impl HealthCheck for RedisCacheService {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        if !self.is_enabled() {
            return HealthStatus::Degraded("cache disabled".to_string());
        }
        match with_timeout(DEFAULT_CALL_TIMEOUT, || self.ping()).await {
            Ok(()) => HealthStatus::Healthy,
            // Requests still succeed against the store.
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
