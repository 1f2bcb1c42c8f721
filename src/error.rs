//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Contract errors
    /// The caller passed an impossible argument (missing key). Never retried.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    // Store errors
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Cascade incomplete at step {step} of {total}: {reason}")]
    CascadeIncomplete {
        /// 1-based index of the step that failed
        step: usize,
        total: usize,
        reason: String,
        /// Whether every applied step was undone
        rolled_back: bool,
    },

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Shorthand for a missing required argument
    pub fn missing(argument: &str) -> Self {
        Self::InvariantViolation(format!("{} must be supplied", argument))
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::CascadeIncomplete { .. } => "CASCADE_INCOMPLETE",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvariantViolation(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::StoreUnavailable(_) | Self::CascadeIncomplete { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Internal(_) | Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True when the error signals a defect in the calling code rather than
    /// a condition of the data.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors but don't expose details to clients
        let (message, details) = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                ("An internal error occurred".to_string(), None)
            }
            AppError::StoreUnavailable(e) => {
                tracing::error!("Store error: {}", e);
                ("The membership store is unavailable".to_string(), None)
            }
            AppError::CascadeIncomplete {
                step,
                total,
                rolled_back,
                ..
            } => {
                tracing::error!(step, total, rolled_back, "{}", self);
                (
                    format!("Cascade incomplete at step {} of {}", step, total),
                    Some(serde_json::json!({
                        "step": step,
                        "total": total,
                        "rolled_back": rolled_back,
                    })),
                )
            }
            _ => (self.to_string(), None),
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

// Implement From for common error types
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                // Check for unique constraint violations
                if db_err.is_unique_violation() {
                    AppError::AlreadyExists("Record already exists".to_string())
                } else {
                    AppError::StoreUnavailable(db_err.to_string())
                }
            }
            _ => AppError::StoreUnavailable(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
