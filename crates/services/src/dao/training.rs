use bson::{DateTime, doc, oid::ObjectId};
use dutydesk_db::models::{
    ClaimStatus, SessionStatus, TrainingClaim, TrainingSession,
};
use mongodb::Database;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct TrainingDao {
    pub claims: BaseDao<TrainingClaim>,
    pub sessions: BaseDao<TrainingSession>,
}

impl TrainingDao {
    pub fn new(db: &Database) -> Self {
        Self {
            claims: BaseDao::new(db, TrainingClaim::COLLECTION),
            sessions: BaseDao::new(db, TrainingSession::COLLECTION),
        }
    }

    pub async fn create_claim(
        &self,
        training_type: String,
        trainee: String,
        trainer: String,
        date: String,
        notes: String,
    ) -> DaoResult<TrainingClaim> {
        let claim = TrainingClaim {
            id: None,
            training_type,
            trainee,
            trainer,
            date,
            status: ClaimStatus::Pending,
            notes,
            claimed_at: DateTime::now(),
        };
        let id = self.claims.insert_one(&claim).await?;
        Ok(TrainingClaim {
            id: Some(id),
            ..claim
        })
    }

    pub async fn list_claims(&self) -> DaoResult<Vec<TrainingClaim>> {
        self.claims
            .find_many(doc! {}, Some(doc! { "claimed_at": -1 }))
            .await
    }

    pub async fn set_claim_status(&self, id: ObjectId, status: ClaimStatus) -> DaoResult<()> {
        let matched = self
            .claims
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "status": bson::to_bson(&status)? } },
            )
            .await?;
        if !matched {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }

    pub async fn delete_claim(&self, id: ObjectId) -> DaoResult<()> {
        let deleted = self.claims.hard_delete(doc! { "_id": id }).await?;
        if deleted == 0 {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }

    pub async fn create_session(
        &self,
        trainee_id: String,
        trainee_name: String,
        claim_id: Option<ObjectId>,
    ) -> DaoResult<TrainingSession> {
        let now = DateTime::now();
        let session = TrainingSession {
            id: None,
            trainee_id,
            trainee_name,
            trainer_id: None,
            trainer_name: None,
            status: SessionStatus::Waiting,
            claim_id,
            created_at: now,
            updated_at: now,
        };
        let id = self.sessions.insert_one(&session).await?;
        Ok(TrainingSession {
            id: Some(id),
            ..session
        })
    }

    pub async fn list_sessions(&self) -> DaoResult<Vec<TrainingSession>> {
        self.sessions
            .find_many(doc! {}, Some(doc! { "created_at": -1 }))
            .await
    }

    /// A trainer picks up a waiting session. Conditional on the waiting
    /// status, so two trainers cannot both start the same run.
    pub async fn start_session(
        &self,
        id: ObjectId,
        trainer_id: String,
        trainer_name: String,
    ) -> DaoResult<()> {
        let matched = self
            .sessions
            .update_one(
                doc! { "_id": id, "status": "waiting" },
                doc! { "$set": {
                    "status": "active",
                    "trainer_id": trainer_id,
                    "trainer_name": trainer_name,
                    "updated_at": DateTime::now(),
                } },
            )
            .await?;
        if !matched {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }

    pub async fn close_session(&self, id: ObjectId, status: SessionStatus) -> DaoResult<()> {
        if matches!(status, SessionStatus::Waiting | SessionStatus::Active) {
            return Err(DaoError::Validation(
                "close requires a terminal status".to_string(),
            ));
        }
        let matched = self
            .sessions
            .update_one(
                doc! { "_id": id, "status": "active" },
                doc! { "$set": {
                    "status": bson::to_bson(&status)?,
                    "updated_at": DateTime::now(),
                } },
            )
            .await?;
        if !matched {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }
}
