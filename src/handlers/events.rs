//! `POST /api/events` and `GET /api/events`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use super::{validated, AppState};
use crate::models::NewEvent;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let new = validated(payload, "Invalid event data", NewEvent::validate)?;
    let event = state
        .storage
        .create_event(new)
        .await
        .map_err(AppError::persistence("Failed to create event"))?;

    tracing::debug!(id = event.id, date = %event.date, "Event scheduled");
    Ok(success(event))
}

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state
        .storage
        .list_events()
        .await
        .map_err(AppError::persistence("Failed to fetch events"))?;

    Ok(success(events))
}
