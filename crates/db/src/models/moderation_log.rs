use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A disciplinary action issued against a player by a staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub target: String,
    pub staff: StaffRef,
    pub action: String,
    pub notes: String,
    pub log_type: String,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffRef {
    pub id: String,
    pub username: String,
}

impl ModerationLog {
    pub const COLLECTION: &'static str = "logs";
}
