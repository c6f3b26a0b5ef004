use axum::{
    Json,
    extract::{Path, State},
};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use dutydesk_db::models::{LoaRequest, LoaStatus};
use dutydesk_services::rank::AdminLevel;
use serde::Deserialize;
use validator::Validate;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLoaRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(length(min = 1, max = 1000))]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct DecideLoaRequest {
    pub status: LoaStatus,
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<LoaRequest>>, ApiError> {
    auth.require(AdminLevel::Moderator)?;
    Ok(Json(state.loa.list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateLoaRequest>,
) -> Result<Json<LoaRequest>, ApiError> {
    auth.require(AdminLevel::Moderator)?;
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let request = state
        .loa
        .create(
            auth.id().to_string(),
            auth.username().to_string(),
            bson::DateTime::from_chrono(body.start_date),
            bson::DateTime::from_chrono(body.end_date),
            body.reason,
        )
        .await?;
    Ok(Json(request))
}

pub async fn decide(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<DecideLoaRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(AdminLevel::Management)?;

    if body.status == LoaStatus::Pending {
        return Err(ApiError::BadRequest(
            "Decision must be approved or denied".to_string(),
        ));
    }

    let id = parse_id(&id)?;
    state
        .loa
        .decide(id, body.status, auth.username().to_string())
        .await?;
    Ok(Json(serde_json::json!({ "updated": true })))
}

/// Management may delete any request; the requester may withdraw their
/// own while it is still pending.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id)?;
    let request = state.loa.get(id).await?;

    let is_owner_withdrawal =
        request.user_id == auth.id() && request.status == LoaStatus::Pending;
    if !is_owner_withdrawal {
        auth.require(AdminLevel::Management)?;
    }

    state.loa.delete(id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid LOA id".to_string()))
}
