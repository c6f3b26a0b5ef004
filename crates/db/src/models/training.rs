use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingClaim {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub training_type: String,
    pub trainee: String,
    pub trainer: String,
    pub date: String,
    #[serde(default)]
    pub status: ClaimStatus,
    pub notes: String,
    pub claimed_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl TrainingClaim {
    pub const COLLECTION: &'static str = "training_claims";
}

/// A trainee waiting for (or in) a live training run with a trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSession {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub trainee_id: String,
    pub trainee_name: String,
    pub trainer_id: Option<String>,
    pub trainer_name: Option<String>,
    #[serde(default)]
    pub status: SessionStatus,
    pub claim_id: Option<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Waiting,
    Active,
    Completed,
    Failed,
    Cancelled,
}

impl TrainingSession {
    pub const COLLECTION: &'static str = "training_sessions";
}
