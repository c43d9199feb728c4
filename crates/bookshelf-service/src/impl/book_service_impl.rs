//! Book service implementation.

use crate::book_service::BookService;
use crate::cache::{CacheExt, CacheInterface, CacheKeys};
use crate::dto::BookRequest;
use crate::metrics::CacheMetrics;
use async_trait::async_trait;
use bookshelf_config::AppConfig;
use bookshelf_core::{
    with_timeout, Book, BookId, BookshelfError, BookshelfResult, PageRequest, DEFAULT_CALL_TIMEOUT,
};
use bookshelf_events::{BookEvent, EventPublisher};
use bookshelf_repository::BookRepository;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Tunables for [`BookServiceImpl`].
#[derive(Debug, Clone)]
pub struct BookServiceSettings {
    /// Topic that receives book events.
    pub topic: String,
    /// Lifetime of cache entries. `None` keeps them until invalidated.
    pub cache_ttl: Option<Duration>,
    /// Upper bound for each store or cache call.
    pub call_timeout: Duration,
    /// Cache key builder.
    pub keys: CacheKeys,
}

impl Default for BookServiceSettings {
    fn default() -> Self {
        Self {
            topic: "book_events".to_string(),
            cache_ttl: None,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            keys: CacheKeys::default(),
        }
    }
}

impl BookServiceSettings {
    /// Builds settings from the application configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            topic: config.events.topic.clone(),
            cache_ttl: config.cache.ttl(),
            call_timeout: config.server.outbound_timeout(),
            keys: CacheKeys::new(config.cache.key_prefix.clone()),
        }
    }
}

/// Book service with look-aside caching and event notification.
///
/// The store is authoritative. Cache reads that fail are treated as misses,
/// cache writes and deletes that fail are logged and ignored, and events are
/// handed to the publisher without waiting for delivery.
pub struct BookServiceImpl {
    repository: Arc<dyn BookRepository>,
    cache: Arc<dyn CacheInterface>,
    publisher: Arc<dyn EventPublisher>,
    settings: BookServiceSettings,
}

impl BookServiceImpl {
    /// Creates a new book service.
    pub fn new(
        repository: Arc<dyn BookRepository>,
        cache: Arc<dyn CacheInterface>,
        publisher: Arc<dyn EventPublisher>,
        settings: BookServiceSettings,
    ) -> Self {
        Self {
            repository,
            cache,
            publisher,
            settings,
        }
    }

    async fn cache_get<T: DeserializeOwned + Send>(&self, key: &str, kind: &'static str) -> Option<T> {
        if !self.cache.is_enabled() {
            return None;
        }

        match with_timeout(self.settings.call_timeout, || self.cache.get::<T>(key)).await {
            Ok(Some(value)) => {
                debug!("Cache hit: {}", key);
                CacheMetrics::hit(kind);
                Some(value)
            }
            Ok(None) => {
                CacheMetrics::miss(kind);
                None
            }
            Err(e) => {
                warn!(%key, error = %e, "Cache read failed, falling back to store");
                CacheMetrics::error("get");
                CacheMetrics::miss(kind);
                None
            }
        }
    }

    async fn cache_set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) {
        if !self.cache.is_enabled() {
            return;
        }

        let ttl = self.settings.cache_ttl;
        if let Err(e) = with_timeout(self.settings.call_timeout, || self.cache.set(key, value, ttl)).await {
            warn!(%key, error = %e, "Cache write failed");
            CacheMetrics::error("set");
        }
    }

    /// Deletes every list entry, plus the entry for `id` when given.
    async fn invalidate(&self, id: Option<BookId>) {
        if !self.cache.is_enabled() {
            return;
        }

        let pattern = self.settings.keys.books_pattern();
        if let Err(e) = with_timeout(self.settings.call_timeout, || self.cache.delete_pattern(&pattern)).await {
            warn!(%pattern, error = %e, "Cache invalidation failed");
            CacheMetrics::error("delete_pattern");
        }

        if let Some(id) = id {
            let key = self.settings.keys.book_by_id(id);
            if let Err(e) = with_timeout(self.settings.call_timeout, || {
                self.cache.delete(std::slice::from_ref(&key))
            })
            .await
            {
                warn!(%key, error = %e, "Cache invalidation failed");
                CacheMetrics::error("delete");
            }
        }
    }

    fn notify(&self, event: BookEvent) {
        self.publisher.publish(&self.settings.topic, event);
    }
}

/// Maps a store failure to the client-facing error, keeping `NotFound`.
fn store_failure(action: &'static str, message: &'static str) -> impl FnOnce(BookshelfError) -> BookshelfError {
    move |e| {
        if e.is_not_found() {
            return e;
        }
        error!(error = %e, "Failed to {}", action);
        BookshelfError::internal(message)
    }
}

#[async_trait]
impl BookService for BookServiceImpl {
    async fn list_books(&self, page: PageRequest) -> BookshelfResult<Vec<Book>> {
        debug!("Listing books, limit: {}, offset: {}", page.limit(), page.offset());

        let key = self.settings.keys.books_page(page);
        if let Some(books) = self.cache_get::<Vec<Book>>(&key, "books").await {
            return Ok(books);
        }

        let books = with_timeout(self.settings.call_timeout, || self.repository.find_all(page))
            .await
            .map_err(store_failure("list books", "Failed to fetch books"))?;

        self.cache_set(&key, &books).await;
        Ok(books)
    }

    async fn get_book(&self, id: BookId) -> BookshelfResult<Book> {
        debug!("Getting book: {}", id);

        let key = self.settings.keys.book_by_id(id);
        if let Some(book) = self.cache_get::<Book>(&key, "book").await {
            return Ok(book);
        }

        let book = self.require_book(id).await?;

        self.cache_set(&key, &book).await;
        Ok(book)
    }

    async fn create_book(&self, request: BookRequest) -> BookshelfResult<Book> {
        debug!("Creating book: {}", request.title);

        request.validate_request()?;
        let new_book = request.into_new_book();

        let book = with_timeout(self.settings.call_timeout, || self.repository.insert(&new_book))
            .await
            .map_err(store_failure("create book", "Failed to create book"))?;

        self.invalidate(None).await;
        self.notify(BookEvent::created(&book));

        info!("Book created: {}", book.id);
        Ok(book)
    }

    async fn update_book(
        &self,
        id: BookId,
        request: BookshelfResult<BookRequest>,
    ) -> BookshelfResult<Book> {
        debug!("Updating book: {}", id);

        let mut book = self.require_book(id).await?;
        let request = request?;
        request.validate_request()?;
        book.replace_fields(request.into_new_book());

        let updated = with_timeout(self.settings.call_timeout, || self.repository.save(&book))
            .await
            .map_err(store_failure("update book", "Failed to update book"))?;

        self.invalidate(Some(id)).await;
        self.notify(BookEvent::updated(&updated));

        info!("Book updated: {}", id);
        Ok(updated)
    }

    async fn delete_book(&self, id: BookId) -> BookshelfResult<()> {
        debug!("Deleting book: {}", id);

        self.require_book(id).await?;

        with_timeout(self.settings.call_timeout, || self.repository.delete(id))
            .await
            .map_err(store_failure("delete book", "Failed to delete book"))?;

        self.invalidate(Some(id)).await;
        self.notify(BookEvent::deleted(id));

        info!("Book deleted: {}", id);
        Ok(())
    }

    async fn require_book(&self, id: BookId) -> BookshelfResult<Book> {
        with_timeout(self.settings.call_timeout, || self.repository.find_by_id(id))
            .await
            .map_err(store_failure("fetch book", "Failed to fetch book"))?
            .ok_or_else(|| BookshelfError::not_found("Book", id))
    }
}

impl std::fmt::Debug for BookServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookServiceImpl")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
