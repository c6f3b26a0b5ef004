pub mod auth;
pub mod dao;
pub mod discord;
pub mod erlc;
pub mod notifications;
pub mod rank;
pub mod reminders;

pub use auth::AuthService;
pub use dao::*;
pub use discord::DiscordService;
pub use erlc::ErlcClient;
pub use rank::{AdminLevel, RankPolicy};
pub use reminders::ReminderDispatcher;
