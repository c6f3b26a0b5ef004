use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::Redirect,
};
use dutydesk_services::auth::Identity;
use rand::{Rng, distr::Alphanumeric};
use serde::Deserialize;
use tracing::warn;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

/// Kick off the Discord authorization-code flow.
pub async fn login(State(state): State<AppState>) -> Redirect {
    let nonce: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    Redirect::temporary(&state.discord.authorize_url(&nonce))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// OAuth callback: exchange the code, pull the member's guild roles,
/// resolve the admin level once, and hand the browser a signed session
/// cookie. Provider failures bounce back to the login page with an error
/// tag rather than a JSON error.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> (HeaderMap, Redirect) {
    let frontend = &state.settings.app.frontend_url;

    let Some(code) = query.code else {
        return (
            HeaderMap::new(),
            Redirect::temporary(&format!("{frontend}/?error=no_code")),
        );
    };

    let identity = match build_identity(&state, &code).await {
        Ok(identity) => identity,
        Err(err) => {
            warn!(error = %err, "Discord OAuth login failed");
            return (
                HeaderMap::new(),
                Redirect::temporary(&format!("{frontend}/?error=oauth_error")),
            );
        }
    };

    let token = match state.auth.issue_session(&identity) {
        Ok(token) => token,
        Err(err) => {
            warn!(error = %err, "Failed to issue session token");
            return (
                HeaderMap::new(),
                Redirect::temporary(&format!("{frontend}/?error=session_error")),
            );
        }
    };

    let mut headers = HeaderMap::new();
    let cookie = format!(
        "session_token={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        token,
        state.auth.ttl_secs()
    );
    headers.insert(header::SET_COOKIE, cookie.parse().unwrap());

    (
        headers,
        Redirect::temporary(&format!("{frontend}/dashboard")),
    )
}

async fn build_identity(state: &AppState, code: &str) -> Result<Identity, ApiError> {
    let access_token = state.discord.exchange_code(code).await?;
    let user = state.discord.fetch_user(&access_token).await?;
    let roles = state.discord.fetch_member_roles(&access_token).await?;
    let admin_level = state.rank.resolve_level(&roles);

    Ok(Identity {
        id: user.id,
        username: user.username,
        avatar: user.avatar,
        admin_level,
        roles,
    })
}

pub async fn me(auth: AuthUser) -> Json<Identity> {
    Json(auth.identity)
}

pub async fn logout() -> (HeaderMap, Json<serde_json::Value>) {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        "session_token=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0"
            .parse()
            .unwrap(),
    );
    (headers, Json(serde_json::json!({ "success": true })))
}
