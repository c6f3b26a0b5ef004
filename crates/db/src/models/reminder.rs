use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A recurring in-game announcement. Intervals are expressed in seconds
/// everywhere; `last_sent_at == None` means the rule has never fired and
/// is due immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderRule {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub message: String,
    pub interval_secs: i64,
    pub active: bool,
    pub last_sent_at: Option<DateTime>,
    pub author: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl ReminderRule {
    pub const COLLECTION: &'static str = "reminders";

    /// Due iff active and at least `interval_secs` whole seconds have
    /// elapsed since the last successful dispatch.
    pub fn is_due(&self, now: DateTime) -> bool {
        if !self.active {
            return false;
        }
        match self.last_sent_at {
            None => true,
            Some(last) => {
                let elapsed_secs =
                    (now.timestamp_millis() - last.timestamp_millis()) / 1000;
                elapsed_secs >= self.interval_secs
            }
        }
    }
}
