//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding. Error bodies follow the shape checkout scripts already
//! parse: `{ "code", "message", "data": { "status" } }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use store_decision_core::CepError;
use thiserror::Error;

use crate::orders::OrderMetadataError;

/// Application-level error type for the decision service.
///
/// Only missing input and missing infrastructure fail a decision request;
/// every other failure is absorbed by the engine's fallback.
#[derive(Debug, Error)]
pub enum AppError {
    /// No CEP in the request.
    #[error("{0}")]
    MissingCep(#[from] CepError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Required infrastructure (such as the session layer) is missing.
    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),

    /// Order metadata could not be stored or read.
    #[error("Order metadata error: {0}")]
    OrderMetadata(#[from] OrderMetadataError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingCep(_) => "no_cep",
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::DependencyUnavailable(_) => "dependency_unavailable",
            Self::OrderMetadata(_) | Self::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingCep(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DependencyUnavailable(_) | Self::OrderMetadata(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::MissingCep(err) => err.to_string(),
            Self::DependencyUnavailable(_) => "Service dependency unavailable".to_string(),
            Self::OrderMetadata(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        let body = json!({
            "code": self.code(),
            "message": message,
            "data": { "status": status.as_u16() },
        });

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
