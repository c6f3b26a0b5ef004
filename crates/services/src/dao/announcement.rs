use bson::{DateTime, doc, oid::ObjectId};
use dutydesk_db::models::{Announcement, Priority};
use mongodb::Database;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct AnnouncementDao {
    pub base: BaseDao<Announcement>,
}

impl AnnouncementDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Announcement::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        title: String,
        content: String,
        priority: Priority,
        author: String,
    ) -> DaoResult<Announcement> {
        let announcement = Announcement {
            id: None,
            title,
            content,
            priority,
            author,
            created_at: DateTime::now(),
        };
        let id = self.base.insert_one(&announcement).await?;
        Ok(Announcement {
            id: Some(id),
            ..announcement
        })
    }

    pub async fn list(&self) -> DaoResult<Vec<Announcement>> {
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
