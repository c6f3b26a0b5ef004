use bson::{Bson, DateTime, doc};
use dutydesk_config::ShiftRoleSettings;
use dutydesk_db::models::{Shift, ShiftType};
use mongodb::Database;
use serde::Serialize;
use thiserror::Error;

use super::base::{BaseDao, DaoError, DaoResult};

#[derive(Debug, Error)]
pub enum ShiftError {
    #[error("You already have an active shift")]
    AlreadyOnDuty,
    #[error("No active shift found")]
    NoActiveShift,
    #[error(transparent)]
    Dao(#[from] DaoError),
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub username: String,
    pub total_duration_secs: i64,
    pub shift_count: i64,
}

/// The Discord role a member must hold to start a shift of this type.
pub fn required_shift_role(shifts: &ShiftRoleSettings, shift_type: ShiftType) -> &str {
    match shift_type {
        ShiftType::Moderating => &shifts.moderating,
        ShiftType::HrSupervisor => &shifts.hr_supervisor,
        ShiftType::FiftyFifty => &shifts.fifty_fifty,
    }
}

pub struct ShiftDao {
    pub base: BaseDao<Shift>,
}

impl ShiftDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Shift::COLLECTION),
        }
    }

    /// Open a shift. The partial unique index on open shifts turns a
    /// concurrent second start into a duplicate-key error, so the
    /// "off duty" precondition and the insert are one atomic step.
    pub async fn start(
        &self,
        user_id: &str,
        username: &str,
        shift_type: ShiftType,
    ) -> Result<Shift, ShiftError> {
        let shift = Shift {
            id: None,
            user_id: user_id.to_string(),
            username: username.to_string(),
            shift_type,
            start_time: DateTime::now(),
            end_time: None,
            duration_secs: 0,
        };

        let id = self.base.insert_one(&shift).await.map_err(|e| match e {
            DaoError::DuplicateKey(_) => ShiftError::AlreadyOnDuty,
            other => ShiftError::Dao(other),
        })?;

        Ok(Shift {
            id: Some(id),
            ..shift
        })
    }

    /// Close the open shift, stamping its duration. The update filter
    /// re-checks `end_time == null`, so two concurrent ends resolve to
    /// exactly one winner.
    pub async fn end(&self, user_id: &str) -> Result<Shift, ShiftError> {
        let open = self
            .current(user_id)
            .await?
            .ok_or(ShiftError::NoActiveShift)?;
        let shift_id = open.id.ok_or(DaoError::NotFound)?;

        let end_time = DateTime::now();
        let duration_secs = Shift::duration_between(open.start_time, end_time);

        let matched = self
            .base
            .update_one(
                doc! { "_id": shift_id, "end_time": null },
                doc! { "$set": { "end_time": end_time, "duration_secs": duration_secs } },
            )
            .await?;

        if !matched {
            return Err(ShiftError::NoActiveShift);
        }

        Ok(Shift {
            end_time: Some(end_time),
            duration_secs,
            ..open
        })
    }

    pub async fn current(&self, user_id: &str) -> DaoResult<Option<Shift>> {
        self.base
            .find_one(doc! { "user_id": user_id, "end_time": null })
            .await
    }

    pub async fn history(&self, user_id: &str) -> DaoResult<Vec<Shift>> {
        self.base
            .find_many(
                doc! { "user_id": user_id, "end_time": { "$ne": null } },
                Some(doc! { "start_time": -1 }),
            )
            .await
    }

    /// Top staff by total completed duty time, descending.
    pub async fn leaderboard(&self, limit: i64) -> DaoResult<Vec<LeaderboardEntry>> {
        use futures::TryStreamExt;

        let pipeline = vec![
            doc! { "$match": { "duration_secs": { "$gt": 0 } } },
            doc! { "$group": {
                "_id": "$user_id",
                "username": { "$first": "$username" },
                "total_duration_secs": { "$sum": "$duration_secs" },
                "shift_count": { "$sum": 1 },
            } },
            doc! { "$sort": { "total_duration_secs": -1 } },
            doc! { "$limit": limit },
        ];

        let mut cursor = self.base.collection().aggregate(pipeline).await?;

        let mut entries = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            entries.push(LeaderboardEntry {
                user_id: doc.get_str("_id").unwrap_or_default().to_string(),
                username: doc.get_str("username").unwrap_or_default().to_string(),
                total_duration_secs: as_i64(doc.get("total_duration_secs")),
                shift_count: as_i64(doc.get("shift_count")),
            });
        }
        Ok(entries)
    }

    pub async fn open_shift_count(&self, user_id: &str) -> DaoResult<u64> {
        self.base
            .count(doc! { "user_id": user_id, "end_time": null })
            .await
    }
}

fn as_i64(value: Option<&Bson>) -> i64 {
    match value {
        Some(Bson::Int64(v)) => *v,
        Some(Bson::Int32(v)) => *v as i64,
        Some(Bson::Double(v)) => *v as i64,
        _ => 0,
    }
}
