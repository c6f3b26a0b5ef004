use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub discord: DiscordSettings,
    pub erlc: ErlcSettings,
    pub reminders: ReminderSettings,
    pub roles: RoleSettings,
    pub shifts: ShiftRoleSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Where the browser lands after a successful or failed login.
    pub frontend_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub name: String,
    pub max_pool_size: Option<u32>,
    pub min_pool_size: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub secret: String,
    pub ttl_secs: u64,
    pub issuer: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiscordSettings {
    pub api_base: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub guild_id: String,
    /// Bot token used for the on-duty role marker. Optional: without it
    /// role grants are skipped with a warning.
    pub bot_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ErlcSettings {
    pub api_base: String,
    pub server_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReminderSettings {
    /// Driver tick period in seconds.
    pub tick_secs: u64,
    /// When set, POST /api/reminders/process requires this bearer secret.
    pub cron_secret: Option<String>,
}

/// Discord role ids mapped to each admin level. A member's effective level
/// is the highest level any of their roles maps to.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RoleSettings {
    #[serde(default)]
    pub direction_board: Vec<String>,
    #[serde(default)]
    pub management: Vec<String>,
    #[serde(default)]
    pub internal_affairs: Vec<String>,
    #[serde(default)]
    pub administrator: Vec<String>,
    #[serde(default)]
    pub moderator: Vec<String>,
    #[serde(default)]
    pub trainee_mod: Vec<String>,
}

/// Discord role ids gating each shift type, plus the marker role granted
/// while a member is on duty.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ShiftRoleSettings {
    #[serde(default)]
    pub moderating: String,
    #[serde(default)]
    pub hr_supervisor: String,
    #[serde(default)]
    pub fifty_fifty: String,
    #[serde(default)]
    pub on_duty: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("DUTYDESK"),
            )
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 3000)?
            .set_default("app.cors_origins", Vec::<String>::new())?
            .set_default("app.frontend_url", "http://localhost:3000")?
            .set_default("database.url", "mongodb://localhost:27017")?
            .set_default("database.name", "dutydesk")?
            .set_default("session.secret", "change-me-in-production")?
            .set_default("session.ttl_secs", 604800)?
            .set_default("session.issuer", "dutydesk")?
            .set_default("discord.api_base", "https://discord.com/api/v10")?
            .set_default("discord.client_id", "")?
            .set_default("discord.client_secret", "")?
            .set_default("discord.redirect_uri", "")?
            .set_default("discord.guild_id", "")?
            .set_default("discord.bot_token", None::<String>)?
            .set_default("erlc.api_base", "https://api.policeroleplay.community/v1")?
            .set_default("erlc.server_key", "")?
            .set_default("erlc.timeout_secs", 10)?
            .set_default("reminders.tick_secs", 30)?
            .set_default("reminders.cron_secret", None::<String>)?
            .set_default("roles.direction_board", Vec::<String>::new())?
            .set_default("roles.management", Vec::<String>::new())?
            .set_default("roles.internal_affairs", Vec::<String>::new())?
            .set_default("roles.administrator", Vec::<String>::new())?
            .set_default("roles.moderator", Vec::<String>::new())?
            .set_default("roles.trainee_mod", Vec::<String>::new())?
            .set_default("shifts.moderating", "")?
            .set_default("shifts.hr_supervisor", "")?
            .set_default("shifts.fifty_fifty", "")?
            .set_default("shifts.on_duty", "")?
            .build()?;

        config.try_deserialize()
    }
}
