use chrono::{Duration, Utc};
use dutydesk_config::SessionSettings;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rank::AdminLevel;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Session expired")]
    SessionExpired,
    #[error("Invalid session: {0}")]
    InvalidSession(String),
}

/// The authenticated principal for one request. Resolved once at login
/// from the Discord member record, then carried only inside the signed
/// session token; the client can read it but cannot alter it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
    pub admin_level: AdminLevel,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub username: String,
    pub avatar: Option<String>,
    pub admin_level: AdminLevel,
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

pub struct AuthService {
    settings: SessionSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(settings: SessionSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());
        Self {
            settings,
            encoding_key,
            decoding_key,
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.settings.ttl_secs
    }

    pub fn issue_session(&self, identity: &Identity) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: identity.id.clone(),
            username: identity.username.clone(),
            avatar: identity.avatar.clone(),
            admin_level: identity.admin_level,
            roles: identity.roles.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.settings.ttl_secs as i64)).timestamp(),
            iss: self.settings.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidSession(e.to_string()))
    }

    pub fn verify_session(&self, token: &str) -> Result<Identity, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.settings.issuer]);

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
                _ => AuthError::InvalidSession(e.to_string()),
            })?;

        let claims = data.claims;
        Ok(Identity {
            id: claims.sub,
            username: claims.username,
            avatar: claims.avatar,
            admin_level: claims.admin_level,
            roles: claims.roles,
        })
    }
}
