use axum::{Json, extract::State};
use dutydesk_services::erlc::{ErlcPlayer, JoinLog};
use dutydesk_services::rank::AdminLevel;
use serde::Deserialize;
use tracing::warn;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

pub async fn command(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CommandRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(AdminLevel::Moderator)?;

    if body.command.trim().is_empty() {
        return Err(ApiError::BadRequest("Command is required".to_string()));
    }

    state.erlc.send_command(&body.command).await.map_err(|err| {
        warn!(user = %auth.id(), error = %err, "Manual server command failed");
        ApiError::from(err)
    })?;

    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn join_logs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<JoinLog>>, ApiError> {
    auth.require(AdminLevel::Moderator)?;

    let logs = state.erlc.join_logs().await.map_err(|err| {
        warn!(error = %err, "Failed to fetch join logs");
        ApiError::from(err)
    })?;
    Ok(Json(logs))
}

pub async fn players(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ErlcPlayer>>, ApiError> {
    auth.require(AdminLevel::Moderator)?;

    let players = state.erlc.players().await.map_err(|err| {
        warn!(error = %err, "Failed to fetch player list");
        ApiError::from(err)
    })?;
    Ok(Json(players))
}
