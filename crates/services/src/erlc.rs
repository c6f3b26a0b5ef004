use dutydesk_config::ErlcSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErlcError {
    #[error("ERLC API unreachable: {0}")]
    Unavailable(#[from] reqwest::Error),
    /// Status 422: the server has no players, so commands have nowhere
    /// to go. Distinct from a generic rejection so callers can report it
    /// as such.
    #[error("No players in server")]
    EmptyServer,
    #[error("ERLC API rejected the request (status {status}): {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErlcPlayer {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Permission")]
    pub permission: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Callsign", skip_serializing_if = "Option::is_none")]
    pub callsign: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinLog {
    #[serde(rename = "Join")]
    pub join: bool,
    #[serde(rename = "Timestamp")]
    pub timestamp: i64,
    #[serde(rename = "Player")]
    pub player: String,
}

/// Split ERLC's "PlayerName:Id" format.
pub fn parse_player(player: &str) -> (&str, &str) {
    match player.split_once(':') {
        Some((name, id)) => (name, id),
        None => (player, "0"),
    }
}

/// Client for the external game-server management API. Every call carries
/// the server key and a request timeout; a timed-out call surfaces as
/// `Unavailable` and is retried on the next scheduler tick, never inline.
pub struct ErlcClient {
    client: reqwest::Client,
    settings: ErlcSettings,
}

impl ErlcClient {
    pub fn new(settings: ErlcSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .expect("reqwest client");
        Self { client, settings }
    }

    pub async fn send_command(&self, command: &str) -> Result<(), ErlcError> {
        let resp = self
            .client
            .post(format!("{}/server/command", self.settings.api_base))
            .header("Server-Key", &self.settings.server_key)
            .json(&serde_json::json!({ "command": command }))
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        if status.as_u16() == 422 {
            return Err(ErlcError::EmptyServer);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ErlcError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    pub async fn players(&self) -> Result<Vec<ErlcPlayer>, ErlcError> {
        self.get_json("/server/players").await
    }

    pub async fn join_logs(&self) -> Result<Vec<JoinLog>, ErlcError> {
        self.get_json("/server/joinlogs").await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ErlcError> {
        let resp = self
            .client
            .get(format!("{}{}", self.settings.api_base, path))
            .header("Server-Key", &self.settings.server_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ErlcError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json().await?)
    }
}
