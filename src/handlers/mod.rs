use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::models::ValidationErrors;
use crate::storage::Storage;
use crate::utils::error::AppError;

pub mod crafts;
pub mod events;
pub mod team;
pub mod volunteers;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

/// Unwraps the JSON body and runs `validate` over it.
///
/// A body that is not JSON at all is reported the same way as a body that
/// fails validation, under the entity's `invalid` message. A body that could
/// not be buffered keeps the extractor's status.
pub(crate) fn validated<T>(
    payload: Result<Json<Value>, JsonRejection>,
    invalid: &'static str,
    validate: fn(&Value) -> Result<T, ValidationErrors>,
) -> Result<T, AppError> {
    let Json(body) = payload.map_err(|rejection| match rejection {
        JsonRejection::JsonDataError(_)
        | JsonRejection::JsonSyntaxError(_)
        | JsonRejection::MissingJsonContentType(_) => {
            AppError::validation(invalid)(ValidationErrors::malformed(rejection.body_text()))
        }
        // Body too large or unreadable: not a problem with the payload's shape
        other => AppError::BodyRejected {
            status: other.status(),
            message: other.body_text(),
        },
    })?;
    validate(&body).map_err(AppError::validation(invalid))
}

pub async fn api_not_found() -> Response {
    AppError::NotFound("Not found".to_string()).into_response()
}
