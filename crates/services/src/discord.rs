use dutydesk_config::DiscordSettings;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("Discord API unreachable: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Discord API rejected the request (status {status})")]
    Rejected { status: u16 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GuildMember {
    #[serde(default)]
    roles: Vec<String>,
}

/// Discord OAuth2 + bot REST client. The OAuth half runs the
/// authorization-code exchange at login; the bot half grants and revokes
/// the on-duty marker role.
pub struct DiscordService {
    client: reqwest::Client,
    settings: DiscordSettings,
}

impl DiscordService {
    pub fn new(settings: DiscordSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "https://discord.com/oauth2/authorize?client_id={}&redirect_uri={}&response_type=code&scope=identify%20guilds.members.read&state={}",
            self.settings.client_id,
            urlencoding::encode(&self.settings.redirect_uri),
            state,
        )
    }

    pub async fn exchange_code(&self, code: &str) -> Result<String, DiscordError> {
        let resp = self
            .client
            .post(format!("{}/oauth2/token", self.settings.api_base))
            .form(&[
                ("client_id", self.settings.client_id.as_str()),
                ("client_secret", self.settings.client_secret.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(DiscordError::Rejected {
                status: resp.status().as_u16(),
            });
        }
        let token: TokenResponse = resp.json().await?;
        Ok(token.access_token)
    }

    pub async fn fetch_user(&self, access_token: &str) -> Result<DiscordUser, DiscordError> {
        let resp = self
            .client
            .get(format!("{}/users/@me", self.settings.api_base))
            .bearer_auth(access_token)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(DiscordError::Rejected {
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json().await?)
    }

    /// Role ids the user holds in the configured guild. A 404 here means
    /// they are not a guild member at all, which resolves to no roles.
    pub async fn fetch_member_roles(
        &self,
        access_token: &str,
    ) -> Result<Vec<String>, DiscordError> {
        let resp = self
            .client
            .get(format!(
                "{}/users/@me/guilds/{}/member",
                self.settings.api_base, self.settings.guild_id
            ))
            .bearer_auth(access_token)
            .send()
            .await?;

        if resp.status().as_u16() == 404 {
            return Ok(Vec::new());
        }
        if !resp.status().is_success() {
            return Err(DiscordError::Rejected {
                status: resp.status().as_u16(),
            });
        }
        let member: GuildMember = resp.json().await?;
        Ok(member.roles)
    }

    /// Best-effort role grant via the bot token. Skipped with a warning
    /// when no bot token is configured.
    pub async fn add_member_role(&self, user_id: &str, role_id: &str) -> Result<(), DiscordError> {
        let Some(bot_token) = self.settings.bot_token.as_deref() else {
            warn!(user_id, role_id, "No bot token configured, skipping role grant");
            return Ok(());
        };

        let resp = self
            .client
            .put(self.member_role_url(user_id, role_id))
            .header("Authorization", format!("Bot {bot_token}"))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(DiscordError::Rejected {
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }

    pub async fn remove_member_role(
        &self,
        user_id: &str,
        role_id: &str,
    ) -> Result<(), DiscordError> {
        let Some(bot_token) = self.settings.bot_token.as_deref() else {
            warn!(user_id, role_id, "No bot token configured, skipping role removal");
            return Ok(());
        };

        let resp = self
            .client
            .delete(self.member_role_url(user_id, role_id))
            .header("Authorization", format!("Bot {bot_token}"))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(DiscordError::Rejected {
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }

    fn member_role_url(&self, user_id: &str, role_id: &str) -> String {
        format!(
            "{}/guilds/{}/members/{}/roles/{}",
            self.settings.api_base, self.settings.guild_id, user_id, role_id
        )
    }
}
