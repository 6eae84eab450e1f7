//! `POST /api/volunteers` and `GET /api/volunteers`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use super::{validated, AppState};
use crate::models::NewVolunteer;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub async fn create_volunteer(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let new = validated(payload, "Invalid volunteer data", NewVolunteer::validate)?;
    let volunteer = state
        .storage
        .create_volunteer(new)
        .await
        .map_err(AppError::persistence("Failed to create volunteer"))?;

    tracing::debug!(id = volunteer.id, "Volunteer registered");
    Ok(success(volunteer))
}

pub async fn list_volunteers(State(state): State<AppState>) -> Result<Response, AppError> {
    let volunteers = state
        .storage
        .list_volunteers()
        .await
        .map_err(AppError::persistence("Failed to fetch volunteers"))?;

    Ok(success(volunteers))
}
