use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A bounded on-duty interval for one staff member. At most one shift per
/// user may be open (`end_time == None`) at any time; the partial unique
/// index in `indexes.rs` enforces this at the store level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub username: String,
    pub shift_type: ShiftType,
    pub start_time: DateTime,
    pub end_time: Option<DateTime>,
    #[serde(default)]
    pub duration_secs: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftType {
    Moderating,
    HrSupervisor,
    FiftyFifty,
}

impl Shift {
    pub const COLLECTION: &'static str = "shifts";

    /// Whole elapsed seconds between `start` and `end`, clamped to zero
    /// when the clock went backwards.
    pub fn duration_between(start: DateTime, end: DateTime) -> i64 {
        (end.timestamp_millis() - start.timestamp_millis()).max(0) / 1000
    }
}
