use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub username: String,
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub reason: String,
    #[serde(default)]
    pub status: LoaStatus,
    pub decided_by: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoaStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl LoaRequest {
    pub const COLLECTION: &'static str = "loa_requests";
}
