//! Unified error types for the Car Rental API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic and persistence port errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
///
/// Repository adapters classify storage failures into these kinds so the
/// services never inspect vendor-specific error codes.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// A unique constraint rejected the write
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// A foreign key constraint rejected the write
    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrity(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Short label for the error kind, used in response bodies and logs
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "Not found",
            DomainError::DuplicateKey(_) | DomainError::Conflict(_) => "Conflict",
            DomainError::ReferentialIntegrity(_) => "Invalid reference",
            DomainError::Validation(_) => "Validation error",
            DomainError::Unauthorized(_) => "Unauthorized",
            DomainError::Database(_) | DomainError::Internal(_) => "Internal server error",
        }
    }

    /// The message carried by the error, without the kind prefix
    pub fn detail(&self) -> &str {
        match self {
            DomainError::NotFound(msg)
            | DomainError::DuplicateKey(msg)
            | DomainError::ReferentialIntegrity(msg)
            | DomainError::Validation(msg)
            | DomainError::Database(msg)
            | DomainError::Unauthorized(msg)
            | DomainError::Conflict(msg)
            | DomainError::Internal(msg) => msg,
        }
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Domain(DomainError::Validation(msg.into()))
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Domain(DomainError::Conflict(msg.into()))
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::Domain(DomainError::NotFound(msg.into()))
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Domain(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Domain(DomainError::DuplicateKey(_))
            | AppError::Domain(DomainError::Conflict(_)) => StatusCode::CONFLICT,
            AppError::Domain(DomainError::ReferentialIntegrity(_))
            | AppError::Domain(DomainError::Validation(_))
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Domain(DomainError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            AppError::Domain(DomainError::Database(_))
            | AppError::Domain(DomainError::Internal(_))
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A body that is not JSON, or does not fit the request type, is a
/// validation failure like any other bad input.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}

/// Error response body for JSON responses
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error, details) = match &self {
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                ("Internal server error", None)
            }
            AppError::Domain(DomainError::Internal(msg)) | AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal server error", None)
            }
            AppError::Domain(DomainError::ReferentialIntegrity(msg)) => {
                // Constraint names are not for clients
                tracing::warn!("Referential integrity violation: {}", msg);
                ("Invalid reference", None)
            }
            AppError::Domain(e) => (e.kind(), Some(e.detail().to_string())),
            AppError::BadRequest(msg) => ("Bad request", Some(msg.clone())),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
