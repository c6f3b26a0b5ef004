use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use bson::oid::ObjectId;
use dutydesk_db::models::ReminderRule;
use dutydesk_services::dao::reminder::ReminderUpdate;
use dutydesk_services::rank::AdminLevel;
use dutydesk_services::reminders::TickOutcome;
use serde::Deserialize;
use validator::Validate;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReminderRequest {
    #[validate(length(min = 1, max = 500))]
    pub message: String,
    #[validate(range(min = 1))]
    pub interval_secs: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReminderRequest {
    #[validate(length(min = 1, max = 500))]
    pub message: Option<String>,
    #[validate(range(min = 1))]
    pub interval_secs: Option<i64>,
    pub active: Option<bool>,
}

pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<ReminderRule>>, ApiError> {
    Ok(Json(state.reminders.list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateReminderRequest>,
) -> Result<Json<ReminderRule>, ApiError> {
    auth.require(AdminLevel::Management)?;
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let rule = state
        .reminders
        .create(body.message, body.interval_secs, auth.username().to_string())
        .await?;
    Ok(Json(rule))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateReminderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(AdminLevel::Management)?;
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let id = parse_id(&id)?;
    state
        .reminders
        .update(
            id,
            ReminderUpdate {
                message: body.message,
                interval_secs: body.interval_secs,
                active: body.active,
            },
        )
        .await
        .map_err(not_found_as_rule)?;
    Ok(Json(serde_json::json!({ "updated": true })))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth.require(AdminLevel::Management)?;

    let id = parse_id(&id)?;
    state
        .reminders
        .delete(id)
        .await
        .map_err(not_found_as_rule)?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Manual driver trigger. Runs the exact same dispatch routine as the
/// scheduled job; with a cron secret configured, an external scheduler
/// may call it without a session.
pub async fn process(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TickOutcome>, ApiError> {
    authorize_process(&state, &headers)?;
    let outcome = state.dispatcher.process_tick().await?;
    Ok(Json(outcome))
}

fn authorize_process(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    if let Some(secret) = state.settings.reminders.cron_secret.as_deref() {
        let bearer = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        if bearer == Some(secret) {
            return Ok(());
        }
    }

    // Fall back to a Management session (the "trigger now" button).
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| s.to_string())
        .or_else(|| {
            headers
                .get(axum::http::header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        cookie.trim().strip_prefix("session_token=").map(String::from)
                    })
                })
        })
        .ok_or_else(|| ApiError::Unauthorized("No session".to_string()))?;

    let identity = state.auth.verify_session(&token)?;
    if identity.admin_level < AdminLevel::Management {
        return Err(ApiError::Forbidden(format!(
            "Requires {} or higher",
            AdminLevel::Management.name()
        )));
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid reminder id".to_string()))
}

fn not_found_as_rule(err: dutydesk_services::dao::base::DaoError) -> ApiError {
    match err {
        dutydesk_services::dao::base::DaoError::NotFound => {
            ApiError::NotFound("Reminder not found".to_string())
        }
        other => other.into(),
    }
}
