use bson::{DateTime, doc, oid::ObjectId};
use dutydesk_db::models::Notification;
use mongodb::Database;

use super::base::{BaseDao, DaoResult};

pub struct NotificationDao {
    pub base: BaseDao<Notification>,
}

impl NotificationDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Notification::COLLECTION),
        }
    }

    pub async fn queue(
        &self,
        target_user: String,
        log_type: String,
        reason: String,
    ) -> DaoResult<ObjectId> {
        let notification = Notification {
            id: None,
            target_user,
            log_type,
            reason,
            sent: false,
            sent_at: None,
            created_at: DateTime::now(),
        };
        self.base.insert_one(&notification).await
    }

    /// Unsent notifications whose target is currently in-game.
    pub async fn pending_for(&self, online_names: &[String]) -> DaoResult<Vec<Notification>> {
        self.base
            .find_many(
                doc! { "sent": false, "target_user": { "$in": online_names } },
                Some(doc! { "created_at": 1 }),
            )
            .await
    }

    pub async fn mark_sent(&self, id: ObjectId) -> DaoResult<bool> {
        self.base
            .update_one(
                doc! { "_id": id, "sent": false },
                doc! { "$set": { "sent": true, "sent_at": DateTime::now() } },
            )
            .await
    }
}
