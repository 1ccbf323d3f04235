// src/api/routes/health.rs
//! Health check routes
//!
//! `ready` probes the employee store; `live` only proves the process answers.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::api::AppState;
use crate::config::RepositoryBackend;

const HEALTHY: &str = "Healthy";
const UNHEALTHY: &str = "Unhealthy";

/// Create health check routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub checks: Vec<CheckEntry>,
}

#[derive(Debug, Serialize)]
pub struct CheckEntry {
    pub name: &'static str,
    pub status: &'static str,
    pub exception: String,
    pub duration: String,
}

/// Readiness check endpoint
/// Returns 200 when the store answers within the configured timeout, 503 otherwise
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let name = match state.config.database.backend {
        RepositoryBackend::Memory => "memory",
        RepositoryBackend::Surreal => "surrealdb",
    };
    let timeout = Duration::from_secs(state.config.database.health_timeout_secs);

    let started = Instant::now();
    let outcome = tokio::time::timeout(timeout, state.service.ping()).await;
    let duration = format!("{:?}", started.elapsed());

    let (status, exception) = match outcome {
        Ok(Ok(())) => (HEALTHY, "none".to_string()),
        Ok(Err(err)) => {
            log::warn!("Readiness check {} failed: {:#}", name, err);
            (UNHEALTHY, err.to_string())
        }
        Err(_) => {
            log::warn!("Readiness check {} timed out after {:?}", name, timeout);
            (UNHEALTHY, format!("The operation has timed out after {:?}", timeout))
        }
    };

    let code = if status == HEALTHY {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(HealthReport {
            status,
            checks: vec![CheckEntry {
                name,
                status,
                exception,
                duration,
            }],
        }),
    )
}

/// Liveness check endpoint
/// Runs no checks; answering at all means the process is up
async fn liveness_check() -> Json<HealthReport> {
    Json(HealthReport {
        status: HEALTHY,
        checks: Vec::new(),
    })
}
