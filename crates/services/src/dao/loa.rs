use bson::{DateTime, doc, oid::ObjectId};
use dutydesk_db::models::{LoaRequest, LoaStatus};
use mongodb::Database;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct LoaDao {
    pub base: BaseDao<LoaRequest>,
}

impl LoaDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, LoaRequest::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        user_id: String,
        username: String,
        start_date: DateTime,
        end_date: DateTime,
        reason: String,
    ) -> DaoResult<LoaRequest> {
        if end_date.timestamp_millis() < start_date.timestamp_millis() {
            return Err(DaoError::Validation(
                "end_date must not precede start_date".to_string(),
            ));
        }

        let now = DateTime::now();
        let request = LoaRequest {
            id: None,
            user_id,
            username,
            start_date,
            end_date,
            reason,
            status: LoaStatus::Pending,
            decided_by: None,
            created_at: now,
            updated_at: now,
        };
        let id = self.base.insert_one(&request).await?;
        Ok(LoaRequest {
            id: Some(id),
            ..request
        })
    }

    pub async fn list(&self) -> DaoResult<Vec<LoaRequest>> {
        self.base
            .find_many(doc! {}, Some(doc! { "created_at": -1 }))
            .await
    }

    pub async fn get(&self, id: ObjectId) -> DaoResult<LoaRequest> {
        self.base.find_by_id(id).await
    }

    /// Decide a pending request. The status filter makes the decision a
    /// one-shot transition; re-deciding returns NotFound.
    pub async fn decide(
        &self,
        id: ObjectId,
        status: LoaStatus,
        decided_by: String,
    ) -> DaoResult<()> {
        let matched = self
            .base
            .update_one(
                doc! { "_id": id, "status": "pending" },
                doc! { "$set": {
                    "status": bson::to_bson(&status)?,
                    "decided_by": decided_by,
                    "updated_at": DateTime::now(),
                } },
            )
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
}
