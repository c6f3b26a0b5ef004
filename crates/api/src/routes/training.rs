use axum::{
    Json,
    extract::{Path, State},
};
use bson::oid::ObjectId;
use dutydesk_db::models::{ClaimStatus, SessionStatus, TrainingClaim, TrainingSession};
use dutydesk_services::rank::AdminLevel;
use serde::Deserialize;
use validator::Validate;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClaimRequest {
    #[validate(length(min = 1, max = 100))]
    pub training_type: String,
    #[validate(length(min = 1, max = 100))]
    pub trainee: String,
    #[validate(length(min = 1, max = 100))]
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct DecideClaimRequest {
    pub status: ClaimStatus,
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub claim_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CloseSessionRequest {
    pub status: SessionStatus,
}

pub async fn list_claims(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<TrainingClaim>>, ApiError> {
    auth.require(AdminLevel::TraineeMod)?;
    Ok(Json(state.training.list_claims().await?))
}

pub async fn create_claim(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateClaimRequest>,
) -> Result<Json<TrainingClaim>, ApiError> {
    auth.require(AdminLevel::TraineeMod)?;
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let claim = state
        .training
        .create_claim(
            body.training_type,
            body.trainee,
            auth.username().to_string(),
            body.date,
            body.notes,
        )
        .await?;
    Ok(Json(claim))
}

pub async fn decide_claim(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<DecideClaimRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(AdminLevel::InternalAffairs)?;

    if body.status == ClaimStatus::Pending {
        return Err(ApiError::BadRequest(
            "Decision must be approved or denied".to_string(),
        ));
    }

    state
        .training
        .set_claim_status(parse_id(&id)?, body.status)
        .await?;
    Ok(Json(serde_json::json!({ "updated": true })))
}

pub async fn delete_claim(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(AdminLevel::Management)?;

    state.training.delete_claim(parse_id(&id)?).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn list_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<TrainingSession>>, ApiError> {
    auth.require(AdminLevel::TraineeMod)?;
    Ok(Json(state.training.list_sessions().await?))
}

/// A trainee queues themselves for a training run.
pub async fn create_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateSessionRequest>,
) -> Result<Json<TrainingSession>, ApiError> {
    auth.require(AdminLevel::TraineeMod)?;

    let claim_id = body
        .claim_id
        .as_deref()
        .map(parse_id)
        .transpose()?;

    let session = state
        .training
        .create_session(auth.id().to_string(), auth.username().to_string(), claim_id)
        .await?;
    Ok(Json(session))
}

/// A trainer picks up a waiting session.
pub async fn start_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(AdminLevel::Moderator)?;

    state
        .training
        .start_session(
            parse_id(&id)?,
            auth.id().to_string(),
            auth.username().to_string(),
        )
        .await?;
    Ok(Json(serde_json::json!({ "started": true })))
}

pub async fn close_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<CloseSessionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(AdminLevel::Moderator)?;

    state
        .training
        .close_session(parse_id(&id)?, body.status)
        .await?;
    Ok(Json(serde_json::json!({ "closed": true })))
}

fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid id".to_string()))
}
