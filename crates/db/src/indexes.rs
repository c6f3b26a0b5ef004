use mongodb::{Database, IndexModel, options::IndexOptions};
use tracing::info;

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    // Shifts. The partial unique index is what guarantees at most one open
    // shift (end_time == null) per user, even under concurrent starts.
    create_indexes(
        db,
        "shifts",
        vec![
            IndexModel::builder()
                .keys(bson::doc! { "user_id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        // Partial indexes reject a bare null equality;
                        // $type matches the explicit null of an open shift.
                        .partial_filter_expression(
                            bson::doc! { "end_time": { "$type": "null" } },
                        )
                        .build(),
                )
                .build(),
            index(bson::doc! { "user_id": 1, "start_time": -1 }),
            index(bson::doc! { "duration_secs": -1 }),
        ],
    )
    .await?;

    // Reminders
    create_indexes(
        db,
        "reminders",
        vec![index(bson::doc! { "active": 1, "created_at": 1 })],
    )
    .await?;

    // Announcements
    create_indexes(
        db,
        "announcements",
        vec![index(bson::doc! { "created_at": -1 })],
    )
    .await?;

    // Moderation logs
    create_indexes(db, "logs", vec![index(bson::doc! { "created_at": -1 })]).await?;

    // Notifications
    create_indexes(
        db,
        "notifications",
        vec![index(bson::doc! { "sent": 1, "target_user": 1 })],
    )
    .await?;

    // LOA requests
    create_indexes(
        db,
        "loa_requests",
        vec![index(bson::doc! { "user_id": 1, "created_at": -1 })],
    )
    .await?;

    // Training
    create_indexes(
        db,
        "training_claims",
        vec![index(bson::doc! { "claimed_at": -1 })],
    )
    .await?;
    create_indexes(
        db,
        "training_sessions",
        vec![index(bson::doc! { "status": 1, "created_at": 1 })],
    )
    .await?;

    info!("Indexes ensured");
    Ok(())
}

async fn create_indexes(
    db: &Database,
    collection: &str,
    indexes: Vec<IndexModel>,
) -> Result<(), mongodb::error::Error> {
    db.collection::<bson::Document>(collection)
        .create_indexes(indexes)
        .await?;
    Ok(())
}

fn index(keys: bson::Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}
