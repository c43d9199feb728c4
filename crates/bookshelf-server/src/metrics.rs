//! Prometheus exporter setup.

use bookshelf_core::{BookshelfError, BookshelfResult};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Installs the global Prometheus recorder and describes every metric.
///
/// Fails if a recorder is already installed in this process.
pub fn install_prometheus() -> BookshelfResult<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| BookshelfError::Configuration(format!("Failed to install metrics recorder: {e}")))?;

    bookshelf_service::metrics::register_metrics();
    bookshelf_events::metrics::register_metrics();

    info!("Prometheus metrics recorder installed");
    Ok(handle)
}
