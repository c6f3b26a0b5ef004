use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use dutydesk_services::auth::Identity;
use dutydesk_services::rank::{AdminLevel, can_access};

use crate::{error::ApiError, state::AppState};

pub const SESSION_COOKIE: &str = "session_token";

/// The verified session identity (cookie or Authorization header).
/// Authorization decisions only ever look at `admin_level`; the raw role
/// ids ride along for shift-type gating.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: Identity,
}

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn username(&self) -> &str {
        &self.identity.username
    }

    pub fn admin_level(&self) -> AdminLevel {
        self.identity.admin_level
    }

    pub fn has_role(&self, role_id: &str) -> bool {
        self.identity.roles.iter().any(|r| r == role_id)
    }

    /// Reject with the required level only; never with which roles would
    /// have sufficed.
    pub fn require(&self, required: AdminLevel) -> Result<(), ApiError> {
        if can_access(self.identity.admin_level, required) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "Requires {} or higher",
                required.name()
            )))
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // Try Authorization header first
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|s| s.to_string())
            // Then try cookie
            .or_else(|| {
                parts
                    .headers
                    .get(header::COOKIE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|cookies| {
                        cookies.split(';').find_map(|cookie| {
                            let cookie = cookie.trim();
                            cookie
                                .strip_prefix("session_token=")
                                .map(|s| s.to_string())
                        })
                    })
            })
            .ok_or_else(|| ApiError::Unauthorized("No session".to_string()))?;

        let identity = app_state.auth.verify_session(&token)?;

        Ok(AuthUser { identity })
    }
}

/// Helper trait for extracting AppState from composite state types
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

impl FromRef<AppState> for AppState {
    fn from_ref(input: &AppState) -> Self {
        input.clone()
    }
}
