use axum::{
    Json,
    extract::{Path, State},
};
use bson::oid::ObjectId;
use dutydesk_db::models::{Announcement, Priority};
use dutydesk_services::rank::AdminLevel;
use serde::Deserialize;
use validator::Validate;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
    #[serde(default)]
    pub priority: Priority,
}

pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Announcement>>, ApiError> {
    Ok(Json(state.announcements.list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateAnnouncementRequest>,
) -> Result<Json<Announcement>, ApiError> {
    auth.require(AdminLevel::DirectionBoard)?;
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let announcement = state
        .announcements
        .create(
            body.title,
            body.content,
            body.priority,
            auth.username().to_string(),
        )
        .await?;
    Ok(Json(announcement))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(AdminLevel::DirectionBoard)?;

    let id = ObjectId::parse_str(&id)
        .map_err(|_| ApiError::BadRequest("Invalid announcement id".to_string()))?;
    state.announcements.delete(id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
