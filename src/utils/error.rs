use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ValidationErrors;
use crate::storage::StorageError;
use crate::utils::response::error as error_response;

/// Message sent for failures nobody anticipated.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}: {errors}")]
    Validation {
        message: &'static str,
        errors: ValidationErrors,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("Request body rejected: {message}")]
    BodyRejected { status: StatusCode, message: String },

    #[error("{message}")]
    Persistence {
        message: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn persistence(message: &'static str) -> impl FnOnce(StorageError) -> AppError {
        move |source| AppError::Persistence { message, source }
    }

    pub fn validation(message: &'static str) -> impl FnOnce(ValidationErrors) -> AppError {
        move |errors| AppError::Validation { message, errors }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BodyRejected { status, .. } => *status,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::Validation { message, errors } => {
                warn!(fields = errors.errors().len(), message = %message, "Rejected payload");
            }
            AppError::NotFound(msg) => {
                warn!(message = %msg, "Resource not found");
            }
            AppError::BodyRejected { status, message } => {
                warn!(status = %status, message = %message, "Request body rejected");
            }
            AppError::Persistence { message, source } => {
                error!(error = ?source, message = %message, "Storage error");
            }
            AppError::Internal(detail) => {
                error!(detail = %detail, "Unhandled error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal details
        self.log();

        // Storage causes and panic payloads stay in the log
        match self {
            AppError::Validation { message, errors } => {
                error_response(message, Some(errors.0), status)
            }
            AppError::NotFound(msg) => error_response(msg, None, status),
            AppError::BodyRejected { message, .. } => error_response(message, None, status),
            AppError::Persistence { message, .. } => error_response(message, None, status),
            AppError::Internal(_) => error_response(INTERNAL_ERROR_MESSAGE, None, status),
        }
    }
}
