use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A pending in-game PM telling a player about a moderation action.
/// Delivered by the notification sweep once the player is seen online.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub target_user: String,
    pub log_type: String,
    pub reason: String,
    #[serde(default)]
    pub sent: bool,
    pub sent_at: Option<DateTime>,
    pub created_at: DateTime,
}

impl Notification {
    pub const COLLECTION: &'static str = "notifications";
}
