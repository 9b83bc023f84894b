//! API and Startup Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cohort_engine::CompareError;
use cohort_model::ModelError;
use derivation::DerivationError;
use serde::Serialize;
use thiserror::Error;

/// Structured error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// Request-level errors with HTTP status mapping
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Compare(#[from] CompareError),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Compare(CompareError::InvalidSelection(reason)) => (
                StatusCode::BAD_REQUEST,
                "INVALID_SELECTION",
                reason.clone(),
            ),
            ApiError::Compare(CompareError::UnknownHospital(name)) => (
                StatusCode::NOT_FOUND,
                "UNKNOWN_HOSPITAL",
                format!("Unknown hospital: {name}"),
            ),
            ApiError::Compare(CompareError::UnknownAttribute(name)) => (
                StatusCode::NOT_FOUND,
                "UNKNOWN_ATTRIBUTE",
                format!("Unknown attribute: {name}"),
            ),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone()),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

/// Errors that stop the service before it serves requests
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Derivation(#[from] DerivationError),
    #[error("{0} categorical values are outside their declared domain")]
    DomainViolations(usize),
    #[error("Logging setup failed: {0}")]
    Logging(String),
    #[error("Metrics recorder setup failed: {0}")]
    Metrics(String),
    #[error("Invalid rate limit: {0}")]
    RateLimit(String),
    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),
}
