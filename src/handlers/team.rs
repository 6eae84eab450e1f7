//! `POST /api/team` and `GET /api/team`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use super::{validated, AppState};
use crate::models::NewTeamMember;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub async fn create_team_member(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let new = validated(payload, "Invalid team member data", NewTeamMember::validate)?;
    let member = state
        .storage
        .create_team_member(new)
        .await
        .map_err(AppError::persistence("Failed to create team member"))?;

    Ok(success(member))
}

pub async fn list_team_members(State(state): State<AppState>) -> Result<Response, AppError> {
    let members = state
        .storage
        .list_team_members()
        .await
        .map_err(AppError::persistence("Failed to fetch team members"))?;

    Ok(success(members))
}
