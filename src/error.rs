//! HTTP-facing error type.
//!
//! Service errors are translated into [`AppError`] at the handler boundary, and
//! [`AppError`] renders the JSON error envelope with a stable status code:
//!
//! | Variant          | Status |
//! |------------------|--------|
//! | `Validation`     | 400    |
//! | `NotFound`       | 404    |
//! | `Conflict`       | 409    |
//! | `InvalidRequest` | 422    |
//! | `Internal`       | 500    |
//! | `Unavailable`    | 503    |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use validator::ValidationErrors;

use crate::application::services::{AllocationError, ResolveError};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    InvalidRequest { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
    #[error("{message}")]
    Unavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_request(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidRequest { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::InvalidRequest { message, details } => {
                ("invalid_request", message, details)
            }
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
            AppError::Unavailable { message, details } => {
                ("service_unavailable", message, details)
            }
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        AppError::invalid_request(
            "Request validation failed",
            json!({ "fields": fields, "errors": errors }),
        )
    }
}

impl From<AllocationError> for AppError {
    fn from(e: AllocationError) -> Self {
        let message = e.to_string();
        match e {
            AllocationError::InvalidCustomCode { code } => {
                AppError::bad_request(message, json!({ "custom_code": code }))
            }
            AllocationError::CodeAlreadyExists { code } => {
                AppError::conflict(message, json!({ "custom_code": code }))
            }
            AllocationError::GenerationExhausted { attempts } => {
                AppError::internal(message, json!({ "attempts": attempts }))
            }
            AllocationError::StoreUnavailable(source) => {
                tracing::error!("Store unavailable during allocation: {}", source);
                AppError::unavailable(message, json!({}))
            }
            AllocationError::StoreWriteFailed(source) => {
                tracing::error!("Store write failed: {}", source);
                AppError::internal(message, json!({ "reason": source.to_string() }))
            }
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        let message = e.to_string();
        match e {
            ResolveError::InvalidCodeFormat { code } => {
                AppError::bad_request(message, json!({ "code": code }))
            }
            ResolveError::CodeNotFound { code } => {
                AppError::not_found(message, json!({ "code": code }))
            }
            ResolveError::StoreUnavailable(source) => {
                tracing::error!("Store unavailable during lookup: {}", source);
                AppError::unavailable(message, json!({}))
            }
            ResolveError::StoreReadFailed(source) => {
                tracing::error!("Store read failed: {}", source);
                AppError::internal(message, json!({ "reason": source.to_string() }))
            }
        }
    }
}
