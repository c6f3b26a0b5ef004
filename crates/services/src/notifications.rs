use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::dao::notification::NotificationDao;
use crate::erlc::{ErlcClient, ErlcError, parse_player};

#[derive(Debug, Serialize)]
pub struct SweepOutcome {
    pub processed: usize,
}

/// PM every pending moderation notification whose target is currently
/// in-game. Send failures leave the notification unsent for the next
/// sweep; each send is isolated.
pub async fn process_pending(
    notifications: &Arc<NotificationDao>,
    erlc: &Arc<ErlcClient>,
) -> Result<SweepOutcome, SweepError> {
    let players = erlc.players().await?;
    let online_names: Vec<String> = players
        .iter()
        .map(|p| parse_player(&p.player).0.to_string())
        .collect();

    if online_names.is_empty() {
        return Ok(SweepOutcome { processed: 0 });
    }

    let pending = notifications.pending_for(&online_names).await?;
    let mut processed = 0;

    for note in pending {
        let Some(id) = note.id else { continue };
        let command = format!(
            ":pm {} You have been {} for {}",
            note.target_user, note.log_type, note.reason
        );
        match erlc.send_command(&command).await {
            Ok(()) => {
                if notifications.mark_sent(id).await? {
                    processed += 1;
                }
            }
            Err(err) => {
                warn!(notification = %id.to_hex(), target = %note.target_user, error = %err, "Notification PM failed");
            }
        }
    }

    Ok(SweepOutcome { processed })
}

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error(transparent)]
    Erlc(#[from] ErlcError),
    #[error(transparent)]
    Dao(#[from] crate::dao::base::DaoError),
}
