//! Health check controller.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use bookshelf_core::HealthStatus;
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Application version.
    pub version: String,
    /// Status of each dependency, keyed by check name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub checks: BTreeMap<String, String>,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

async fn run_checks(state: &AppState) -> Vec<(String, HealthStatus)> {
    join_all(state.health_checks.iter().map(|check| async move {
        (check.name().to_string(), check.check().await)
    }))
    .await
}

/// Health check endpoint.
///
/// Always 200; the body reports each dependency.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let results = run_checks(&state).await;

    let status = if results.iter().any(|(_, s)| s.is_unhealthy()) {
        "unhealthy"
    } else if results.iter().all(|(_, s)| s.is_healthy()) {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: results
            .into_iter()
            .map(|(name, s)| (name, s.label().to_string()))
            .collect(),
    })
}

/// Readiness check endpoint.
///
/// 503 while any dependency is unhealthy. A degraded cache still counts as ready.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let results = run_checks(&state).await;

    match results.iter().find(|(_, s)| s.is_unhealthy()) {
        Some((name, status)) => {
            tracing::warn!(check = %name, ?status, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
        None => StatusCode::OK,
    }
}

/// Liveness check endpoint.
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
