use axum::{
    Json,
    extract::{Query, State},
};
use dutydesk_db::models::{Shift, ShiftType};
use dutydesk_services::dao::shift::{LeaderboardEntry, required_shift_role};
use dutydesk_services::rank::AdminLevel;
use serde::Deserialize;
use tracing::warn;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct StartShiftRequest {
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
}

pub async fn start(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<StartShiftRequest>,
) -> Result<Json<Shift>, ApiError> {
    auth.require(AdminLevel::TraineeMod)?;

    let required_role = required_shift_role(&state.settings.shifts, body.shift_type);
    if required_role.is_empty() || !auth.has_role(required_role) {
        return Err(ApiError::Forbidden(
            "You do not have the required role for this shift type".to_string(),
        ));
    }

    let shift = state
        .shifts
        .start(auth.id(), auth.username(), body.shift_type)
        .await?;

    // On-duty marker is best effort; a Discord hiccup never undoes the shift.
    if let Err(err) = state
        .discord
        .add_member_role(auth.id(), &state.settings.shifts.on_duty)
        .await
    {
        warn!(user = %auth.id(), error = %err, "Failed to grant on-duty role");
    }

    Ok(Json(shift))
}

pub async fn end(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Shift>, ApiError> {
    auth.require(AdminLevel::TraineeMod)?;

    let shift = state.shifts.end(auth.id()).await?;

    if let Err(err) = state
        .discord
        .remove_member_role(auth.id(), &state.settings.shifts.on_duty)
        .await
    {
        warn!(user = %auth.id(), error = %err, "Failed to revoke on-duty role");
    }

    Ok(Json(shift))
}

pub async fn current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let shift = state.shifts.current(auth.id()).await?;
    Ok(Json(serde_json::json!({ "active_shift": shift })))
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}

pub async fn leaderboard(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let entries = state.shifts.leaderboard(limit).await?;
    Ok(Json(entries))
}
