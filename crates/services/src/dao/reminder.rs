use bson::{DateTime, doc, oid::ObjectId};
use dutydesk_db::models::ReminderRule;
use mongodb::Database;

use super::base::{BaseDao, DaoError, DaoResult};

#[derive(Debug, Default)]
pub struct ReminderUpdate {
    pub message: Option<String>,
    pub interval_secs: Option<i64>,
    pub active: Option<bool>,
}

pub struct ReminderDao {
    pub base: BaseDao<ReminderRule>,
}

impl ReminderDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, ReminderRule::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        message: String,
        interval_secs: i64,
        author: String,
    ) -> DaoResult<ReminderRule> {
        if interval_secs <= 0 {
            return Err(DaoError::Validation(
                "interval_secs must be positive".to_string(),
            ));
        }

        let now = DateTime::now();
        let rule = ReminderRule {
            id: None,
            message,
            interval_secs,
            active: true,
            last_sent_at: None,
            author,
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&rule).await?;
        Ok(ReminderRule {
            id: Some(id),
            ..rule
        })
    }

    pub async fn list(&self) -> DaoResult<Vec<ReminderRule>> {
        self.base
            .find_many(doc! {}, Some(doc! { "created_at": -1 }))
            .await
    }

    /// Active rules in creation order: the deterministic walk order for
    /// one driver tick.
    pub async fn list_active(&self) -> DaoResult<Vec<ReminderRule>> {
        self.base
            .find_many(doc! { "active": true }, Some(doc! { "created_at": 1 }))
            .await
    }

    pub async fn get(&self, id: ObjectId) -> DaoResult<ReminderRule> {
        self.base.find_by_id(id).await
    }

    pub async fn update(&self, id: ObjectId, fields: ReminderUpdate) -> DaoResult<()> {
        if let Some(interval) = fields.interval_secs {
            if interval <= 0 {
                return Err(DaoError::Validation(
                    "interval_secs must be positive".to_string(),
                ));
            }
        }

        let mut set = doc! { "updated_at": DateTime::now() };
        if let Some(message) = fields.message {
            set.insert("message", message);
        }
        if let Some(interval) = fields.interval_secs {
            set.insert("interval_secs", interval);
        }
        if let Some(active) = fields.active {
            set.insert("active", active);
        }

        let matched = self
            .base
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await?;
        if !matched {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }

    pub async fn delete(&self, id: ObjectId) -> DaoResult<()> {
        let deleted = self.base.hard_delete(doc! { "_id": id }).await?;
        if deleted == 0 {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }

    /// Atomically claim a due rule by advancing `last_sent_at` from the
    /// value this driver observed to `now`. A false return means another
    /// driver claimed it first; the caller must skip the rule.
    pub async fn claim_due(
        &self,
        id: ObjectId,
        observed_last_sent: Option<DateTime>,
        now: DateTime,
    ) -> DaoResult<bool> {
        let observed = match observed_last_sent {
            Some(ts) => bson::Bson::DateTime(ts),
            None => bson::Bson::Null,
        };
        self.base
            .update_one(
                doc! { "_id": id, "active": true, "last_sent_at": observed },
                doc! { "$set": { "last_sent_at": now } },
            )
            .await
    }

    /// Roll a failed dispatch back so the rule is due again next tick.
    /// Conditional on our own claim timestamp, so a claim taken by a later
    /// tick is never clobbered.
    pub async fn release_claim(
        &self,
        id: ObjectId,
        claimed_at: DateTime,
        previous_last_sent: Option<DateTime>,
    ) -> DaoResult<bool> {
        let previous = match previous_last_sent {
            Some(ts) => bson::Bson::DateTime(ts),
            None => bson::Bson::Null,
        };
        self.base
            .update_one(
                doc! { "_id": id, "last_sent_at": claimed_at },
                doc! { "$set": { "last_sent_at": previous } },
            )
            .await
    }
}
