use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::models::FieldError;

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// 200 with `data` as the whole JSON body.
pub fn success<T>(data: T) -> Response
where
    T: Serialize,
{
    (StatusCode::OK, Json(data)).into_response()
}

pub fn error(
    message: impl Into<String>,
    details: Option<Vec<FieldError>>,
    status: StatusCode,
) -> Response {
    let body = ApiErrorResponse {
        error: message.into(),
        details,
    };

    (status, Json(body)).into_response()
}
