use axum::{Json, extract::State};
use dutydesk_services::notifications::{self, SweepError, SweepOutcome};
use dutydesk_services::rank::AdminLevel;
use tracing::warn;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

pub async fn check(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<SweepOutcome>, ApiError> {
    auth.require(AdminLevel::Moderator)?;

    let outcome = notifications::process_pending(&state.notifications, &state.erlc)
        .await
        .map_err(|err| {
            warn!(error = %err, "Notification sweep failed");
            match err {
                SweepError::Erlc(e) => ApiError::from(e),
                SweepError::Dao(e) => ApiError::from(e),
            }
        })?;
    Ok(Json(outcome))
}
