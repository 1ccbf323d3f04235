// src/api/mod.rs
//! API layer module
//!
//! This module contains the HTTP API layer that handles incoming requests,
//! validates input, calls the employee service, and formats responses.

pub mod dto;
pub mod routes;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::EmployeeService;

/// API application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EmployeeService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(service: Arc<EmployeeService>, config: Arc<Config>) -> Self {
        Self { service, config }
    }
}

/// Create the main API router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let origins = &state.config.server.cors_origins;
    let cors = if origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        // Config::validate rejects unparsable origins
        CorsLayer::new().allow_origin(
            origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        )
    }
    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    .expose_headers([header::LOCATION]);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.server.request_timeout_secs,
        )));

    Router::new()
        .nest("/employees", routes::employees::create_routes())
        .nest("/healthcheck", routes::health::create_routes())
        .layer(middleware)
        .with_state(state)
}

/// API error types
pub mod error {
    use axum::{
        extract::rejection::JsonRejection,
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };
    use serde_json::json;

    use crate::validation::FieldViolation;

    /// API error type
    #[derive(Debug, thiserror::Error)]
    pub enum ApiError {
        #[error("Bad Request: {0}")]
        BadRequest(String),
        #[error("Not Found: {0}")]
        NotFound(String),
        #[error("Validation failed for {} field(s)", .0.len())]
        Validation(Vec<FieldViolation>),
        #[error("Internal Server Error: {0}")]
        InternalServerError(String),
    }

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            let (status, error_message, fields) = match self {
                ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
                ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
                ApiError::Validation(violations) => (
                    StatusCode::BAD_REQUEST,
                    "One or more validation errors occurred".to_string(),
                    Some(violations),
                ),
                ApiError::InternalServerError(msg) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
                }
            };

            let mut error = json!({
                "message": error_message,
                "code": status.as_u16()
            });
            if let Some(fields) = fields {
                error["fields"] = json!(fields);
            }

            (status, Json(json!({ "error": error }))).into_response()
        }
    }

    impl From<anyhow::Error> for ApiError {
        fn from(err: anyhow::Error) -> Self {
            log::error!("Internal error: {:?}", err);
            ApiError::InternalServerError("An internal error occurred".to_string())
        }
    }

    impl From<uuid::Error> for ApiError {
        fn from(err: uuid::Error) -> Self {
            log::debug!("UUID parsing error: {:?}", err);
            ApiError::BadRequest("Invalid UUID format".to_string())
        }
    }

    impl From<JsonRejection> for ApiError {
        fn from(rejection: JsonRejection) -> Self {
            log::debug!("Rejected request body: {}", rejection.body_text());
            ApiError::BadRequest(rejection.body_text())
        }
    }

    impl From<Vec<FieldViolation>> for ApiError {
        fn from(violations: Vec<FieldViolation>) -> Self {
            ApiError::Validation(violations)
        }
    }
}

/// API result type
pub type ApiResult<T> = Result<T, error::ApiError>;
