//! Explicit construction of the runtime components.
//!
//! Every client is built once here and handed down as `Arc<dyn Trait>`.
//!
//! ```text
//! AppConfig
//!   ├─ DatabasePool ─→ MySqlBookRepository ─┐
//!   ├─ RedisCacheService ───────────────────┼─→ BookServiceImpl ─→ AppState
//!   └─ QueuedEventPublisher (RedisStreamSink)┘
//! ```

use bookshelf_config::AppConfig;
use bookshelf_core::{with_timeout, BookshelfResult, HealthCheck};
use bookshelf_events::{
    EventPublisher, NoopEventPublisher, PublisherHandle, QueuedEventPublisher, RedisStreamSink,
};
use bookshelf_repository::{BookRepository, DatabasePool, MySqlBookRepository};
use bookshelf_rest::AppState;
use bookshelf_service::{
    create_cache_pool, BookService, BookServiceImpl, BookServiceSettings, RedisCacheService,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Builds the cache, probing Redis once.
///
/// The probe is bounded by `server.outbound_timeout_ms`. An unreachable Redis
/// is logged and the cache stays active; every request then falls back to the
/// store until Redis comes back.
pub async fn build_cache(config: &AppConfig) -> BookshelfResult<Arc<RedisCacheService>> {
    if !config.redis.enabled {
        info!("Redis cache disabled");
        return Ok(Arc::new(RedisCacheService::disabled()));
    }

    let timeout = config.server.outbound_timeout();
    let pool = create_cache_pool(&config.redis, timeout)?;
    let cache = RedisCacheService::new(pool);

    match with_timeout(timeout, || cache.ping()).await {
        Ok(()) => info!("Connected to Redis cache"),
        Err(e) => warn!("Could not reach Redis cache, continuing without it: {}", e),
    }

    Ok(Arc::new(cache))
}

/// Builds the event publisher and, when events are enabled, the handle that
/// drains it on shutdown.
///
/// Must be called inside a Tokio runtime.
pub fn build_publisher(
    config: &AppConfig,
) -> BookshelfResult<(Arc<dyn EventPublisher>, Option<PublisherHandle>)> {
    if !config.events.enabled {
        info!("Event publishing disabled");
        return Ok((Arc::new(NoopEventPublisher), None));
    }

    let url = config.events.url_or(&config.redis.url);
    let timeout = config.server.outbound_timeout();
    let pool = bookshelf_events::create_pool(url, config.redis.pool_size, timeout)?;
    let sink = Arc::new(
        RedisStreamSink::new(pool, config.events.stream_max_len).with_call_timeout(timeout),
    );
    let (publisher, handle) = QueuedEventPublisher::spawn(sink, config.events.channel_capacity);

    info!(topic = %config.events.topic, "Event publishing enabled");
    Ok((Arc::new(publisher), Some(handle)))
}

/// Builds the book service over the given adapters.
pub fn build_book_service(
    config: &AppConfig,
    repository: Arc<dyn BookRepository>,
    cache: Arc<RedisCacheService>,
    publisher: Arc<dyn EventPublisher>,
) -> Arc<dyn BookService> {
    Arc::new(BookServiceImpl::new(
        repository,
        cache,
        publisher,
        BookServiceSettings::from_config(config),
    ))
}

/// Fully wired application.
pub struct Application {
    pub state: AppState,
    pub db_pool: Arc<DatabasePool>,
    pub publisher_handle: Option<PublisherHandle>,
}

impl Application {
    /// Connects every dependency and assembles the handler state.
    ///
    /// A store that cannot be reached fails startup.
    pub async fn build(config: &AppConfig) -> BookshelfResult<Self> {
        let db_pool = bookshelf_repository::create_pool(&config.database).await?;
        let repository: Arc<dyn BookRepository> = Arc::new(MySqlBookRepository::new(db_pool.clone()));

        let cache = build_cache(config).await?;
        let (publisher, publisher_handle) = build_publisher(config)?;
        let book_service = build_book_service(config, repository, cache.clone(), publisher);

        let state = AppState::new(book_service)
            .with_health_check(db_pool.clone() as Arc<dyn HealthCheck>)
            .with_health_check(cache as Arc<dyn HealthCheck>);

        Ok(Self {
            state,
            db_pool,
            publisher_handle,
        })
    }

    /// Drains pending events, then closes the store pool.
    pub async fn shutdown(self, grace: Duration) {
        if let Some(handle) = self.publisher_handle {
            handle.shutdown(grace).await;
        }
        bookshelf_repository::DatabasePoolInterface::close(self.db_pool.as_ref()).await;
    }
}
