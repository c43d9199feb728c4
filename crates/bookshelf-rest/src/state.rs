//! Application state for Axum handlers.

use bookshelf_core::HealthCheck;
use bookshelf_service::BookService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub book_service: Arc<dyn BookService>,
    /// Dependencies reported by `/health` and `/ready`.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    /// Renders the Prometheus scrape body when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(book_service: Arc<dyn BookService>) -> Self {
        Self {
            book_service,
            health_checks: Vec::new(),
            metrics: None,
        }
    }

    /// Adds a dependency health check.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }

    /// Enables the metrics endpoint.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
