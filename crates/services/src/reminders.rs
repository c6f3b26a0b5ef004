use bson::DateTime;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::dao::base::DaoResult;
use crate::dao::reminder::ReminderDao;
use crate::erlc::{ErlcClient, ErlcError};

/// Command token prepended to plain reminder messages. Messages that
/// already start with a command token (`:m`, `:h`, ...) go out verbatim.
const HINT_PREFIX: &str = ":h";

pub fn format_command(message: &str) -> String {
    if message.starts_with(':') {
        message.to_string()
    } else {
        format!("{HINT_PREFIX} {message}")
    }
}

#[derive(Debug, Serialize)]
pub struct TickOutcome {
    pub sent_count: usize,
    pub results: Vec<RuleOutcome>,
}

#[derive(Debug, Serialize)]
pub struct RuleOutcome {
    pub id: String,
    pub status: DispatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    Sent,
    /// Another driver claimed the rule between our read and our claim.
    Skipped,
    /// The game server reported no players (422); the rule stays due.
    EmptyServer,
    Failed,
}

/// The single authoritative reminder driver. One `process_tick` walks all
/// active rules in creation order, claims each due rule with an atomic
/// conditional write, and dispatches the formatted command. Failures are
/// isolated per rule and leave the rule due for the next tick.
pub struct ReminderDispatcher {
    reminders: Arc<ReminderDao>,
    erlc: Arc<ErlcClient>,
}

impl ReminderDispatcher {
    pub fn new(reminders: Arc<ReminderDao>, erlc: Arc<ErlcClient>) -> Self {
        Self { reminders, erlc }
    }

    pub async fn process_tick(&self) -> DaoResult<TickOutcome> {
        let now = DateTime::now();
        let rules = self.reminders.list_active().await?;

        let mut sent_count = 0;
        let mut results = Vec::new();

        for rule in rules {
            if !rule.is_due(now) {
                continue;
            }
            let Some(id) = rule.id else { continue };
            let id_hex = id.to_hex();

            let claimed = self
                .reminders
                .claim_due(id, rule.last_sent_at, now)
                .await?;
            if !claimed {
                results.push(RuleOutcome {
                    id: id_hex,
                    status: DispatchStatus::Skipped,
                    error: None,
                });
                continue;
            }

            let command = format_command(&rule.message);
            match self.erlc.send_command(&command).await {
                Ok(()) => {
                    info!(reminder = %id_hex, "Reminder dispatched");
                    sent_count += 1;
                    results.push(RuleOutcome {
                        id: id_hex,
                        status: DispatchStatus::Sent,
                        error: None,
                    });
                }
                Err(err) => {
                    // Put the claim back so the rule is due again next tick.
                    if let Err(release_err) = self
                        .reminders
                        .release_claim(id, now, rule.last_sent_at)
                        .await
                    {
                        warn!(reminder = %id_hex, error = %release_err, "Failed to release reminder claim");
                    }
                    let status = match err {
                        ErlcError::EmptyServer => DispatchStatus::EmptyServer,
                        _ => DispatchStatus::Failed,
                    };
                    warn!(reminder = %id_hex, error = %err, "Reminder dispatch failed");
                    results.push(RuleOutcome {
                        id: id_hex,
                        status,
                        error: Some(err.to_string()),
                    });
                }
            }
        }

        Ok(TickOutcome {
            sent_count,
            results,
        })
    }
}
