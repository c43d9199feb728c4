//! Shared fixtures for router tests.
//!
//! The real `BookServiceImpl` runs against in-memory adapters so that the
//! caching, invalidation and notification paths are exercised end to end.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bookshelf_config::{ObservabilityConfig, ServerConfig};
use bookshelf_core::{
    Book, BookId, BookshelfError, BookshelfResult, HealthCheck, HealthStatus, NewBook, PageRequest,
};
use bookshelf_events::{BookEvent, EventPublisher};
use bookshelf_repository::BookRepository;
use bookshelf_rest::{create_router, AppState};
use bookshelf_service::{BookServiceImpl, BookServiceSettings, CacheInterface};
use http_body_util::BodyExt;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

#[derive(Default)]
pub struct InMemoryBookRepository {
    books: Mutex<BTreeMap<BookId, Book>>,
    next_id: Mutex<i64>,
    failing: AtomicBool,
    reads: AtomicUsize,
}

impl InMemoryBookRepository {
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.books.lock().unwrap().len()
    }

    /// Number of single-book lookups served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn check(&self) -> BookshelfResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BookshelfError::Database("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_all(&self, page: PageRequest) -> BookshelfResult<Vec<Book>> {
        self.check()?;
        let offset = usize::try_from(page.offset()).unwrap();
        let limit = usize::try_from(page.limit()).unwrap();
        Ok(self.books.lock().unwrap().values().skip(offset).take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: BookId) -> BookshelfResult<Option<Book>> {
        self.check()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.books.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, book: &NewBook) -> BookshelfResult<Book> {
        self.check()?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let created = Book::from_new(BookId(*next_id), book.clone());
        self.books.lock().unwrap().insert(created.id, created.clone());
        Ok(created)
    }

    async fn save(&self, book: &Book) -> BookshelfResult<Book> {
        self.check()?;
        let mut books = self.books.lock().unwrap();
        match books.get_mut(&book.id) {
            Some(existing) => {
                *existing = book.clone();
                Ok(book.clone())
            }
            None => Err(BookshelfError::not_found("Book", book.id)),
        }
    }

    async fn delete(&self, id: BookId) -> BookshelfResult<()> {
        self.check()?;
        self.books
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| BookshelfError::not_found("Book", id))
    }
}

#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryCache {
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> BookshelfResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: &str, _ttl: Option<Duration>) -> BookshelfResult<()> {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> BookshelfResult<u64> {
        let mut entries = self.entries.lock().unwrap();
        Ok(keys.iter().filter(|k| entries.remove(*k).is_some()).count() as u64)
    }

    async fn delete_pattern(&self, pattern: &str) -> BookshelfResult<u64> {
        let stem = pattern.trim_end_matches('*');
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|k, _| !k.starts_with(stem));
        Ok((before - entries.len()) as u64)
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<(String, BookEvent)>>,
}

impl RecordingPublisher {
    pub fn messages(&self) -> Vec<String> {
        self.events.lock().unwrap().iter().map(|(_, e)| e.message.clone()).collect()
    }

    pub fn topics(&self) -> Vec<String> {
        self.events.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, topic: &str, event: BookEvent) {
        self.events.lock().unwrap().push((topic.to_string(), event));
    }
}

/// Health check with a fixed answer.
pub struct StaticHealthCheck {
    pub name: &'static str,
    pub status: HealthStatus,
}

#[async_trait]
impl HealthCheck for StaticHealthCheck {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self) -> HealthStatus {
        self.status.clone()
    }
}

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<InMemoryBookRepository>,
    pub cache: Arc<InMemoryCache>,
    pub publisher: Arc<RecordingPublisher>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_health_checks(Vec::new())
    }

    pub fn with_health_checks(checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        Self::build(checks, &ServerConfig::default())
    }

    pub fn with_server_config(server_config: &ServerConfig) -> Self {
        Self::build(Vec::new(), server_config)
    }

    fn build(checks: Vec<Arc<dyn HealthCheck>>, server_config: &ServerConfig) -> Self {
        let repo = Arc::new(InMemoryBookRepository::default());
        let cache = Arc::new(InMemoryCache::default());
        let publisher = Arc::new(RecordingPublisher::default());

        let service = Arc::new(BookServiceImpl::new(
            repo.clone(),
            cache.clone(),
            publisher.clone(),
            BookServiceSettings::default(),
        ));

        let mut state = AppState::new(service);
        for check in checks {
            state = state.with_health_check(check);
        }

        let router = create_router(state, server_config, &ObservabilityConfig::default());

        Self {
            router,
            repo,
            cache,
            publisher,
        }
    }

    /// Sends a request and returns the status and the decoded JSON body.
    ///
    /// An empty body decodes to `Value::Null`.
    pub async fn send(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let request = builder
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn create(&self, title: &str, author: &str, year: i32) -> serde_json::Value {
        let body = serde_json::json!({"title": title, "author": author, "year": year}).to_string();
        let (status, json) = self.send("POST", "/books", Some(&body)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
        json
    }
}
