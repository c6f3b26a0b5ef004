use axum::{
    Json,
    extract::{Path, State},
};
use bson::oid::ObjectId;
use dutydesk_db::models::{ModerationLog, StaffRef};
use dutydesk_services::rank::AdminLevel;
use serde::Deserialize;
use validator::Validate;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLogRequest {
    #[validate(length(min = 1, max = 100))]
    pub target_user: String,
    #[validate(length(min = 1, max = 50))]
    pub log_type: String,
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
    pub description: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ModerationLog>>, ApiError> {
    auth.require(AdminLevel::Moderator)?;
    Ok(Json(state.logs.list().await?))
}

/// Record the action and queue an in-game PM for the target; the PM goes
/// out on the next notification sweep once the player is online.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateLogRequest>,
) -> Result<Json<ModerationLog>, ApiError> {
    auth.require(AdminLevel::Moderator)?;
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let notes = match &body.description {
        Some(description) => format!("{}: {}", body.reason, description),
        None => body.reason.clone(),
    };

    let log = state
        .logs
        .create(
            body.target_user.clone(),
            StaffRef {
                id: auth.id().to_string(),
                username: auth.username().to_string(),
            },
            body.log_type.clone(),
            notes,
        )
        .await?;

    state
        .notifications
        .queue(body.target_user, body.log_type, body.reason)
        .await?;

    Ok(Json(log))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(AdminLevel::InternalAffairs)?;

    let id = ObjectId::parse_str(&id)
        .map_err(|_| ApiError::BadRequest("Invalid log id".to_string()))?;
    state.logs.delete(id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
