use bson::{DateTime, doc, oid::ObjectId};
use dutydesk_db::models::{ModerationLog, StaffRef};
use mongodb::Database;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct ModerationLogDao {
    pub base: BaseDao<ModerationLog>,
}

impl ModerationLogDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, ModerationLog::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        target: String,
        staff: StaffRef,
        log_type: String,
        notes: String,
    ) -> DaoResult<ModerationLog> {
        let log = ModerationLog {
            id: None,
            target,
            staff,
            action: format!("Issued a {log_type}"),
            notes,
            log_type,
            created_at: DateTime::now(),
        };
        let id = self.base.insert_one(&log).await?;
        Ok(ModerationLog {
            id: Some(id),
            ..log
        })
    }

    pub async fn list(&self) -> DaoResult<Vec<ModerationLog>> {
        self.base
            .find_many(doc! {}, Some(doc! { "created_at": -1 }))
            .await
    }

    pub async fn delete(&self, id: ObjectId) -> DaoResult<()> {
        let deleted = self.base.hard_delete(doc! { "_id": id }).await?;
        if deleted == 0 {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }
}
