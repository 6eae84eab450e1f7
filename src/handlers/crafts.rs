//! `POST /api/crafts`, `GET /api/crafts` and `GET /api/crafts/:id`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use super::{validated, AppState};
use crate::models::NewCraft;
use crate::utils::error::AppError;
use crate::utils::response::success;

const CRAFT_NOT_FOUND: &str = "Craft not found";

pub async fn create_craft(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let new = validated(payload, "Invalid craft data", NewCraft::validate)?;
    let craft = state
        .storage
        .create_craft(new)
        .await
        .map_err(AppError::persistence("Failed to create craft"))?;

    tracing::debug!(id = craft.id, "Craft created");
    Ok(success(craft))
}

pub async fn list_crafts(State(state): State<AppState>) -> Result<Response, AppError> {
    let crafts = state
        .storage
        .list_crafts()
        .await
        .map_err(AppError::persistence("Failed to fetch crafts"))?;

    Ok(success(crafts))
}

/// Ids that are not 32-bit integers cannot match a row, so they get the
/// same 404 as an unknown id.
pub async fn get_craft(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let id: i32 = raw_id
        .parse()
        .map_err(|_| AppError::NotFound(CRAFT_NOT_FOUND.to_string()))?;

    let craft = state
        .storage
        .get_craft(id)
        .await
        .map_err(AppError::persistence("Failed to fetch craft"))?
        .ok_or_else(|| AppError::NotFound(CRAFT_NOT_FOUND.to_string()))?;

    Ok(success(craft))
}
