use anyhow::Context;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Client, Database, IndexModel,
};

use crate::config::AppConfig;

pub const USERS: &str = "users";
pub const CONTENTS: &str = "contents";

pub async fn connect(config: &AppConfig) -> anyhow::Result<Database> {
    let client = Client::with_uri_str(&config.mongo_url)
        .await
        .context("connect to mongodb")?;
    Ok(client.database(&config.db_name))
}

/// Creates the indexes the handlers rely on. Signup inserts against the
/// unique email index; a concurrent duplicate surfaces as a duplicate-key
/// write error.
pub async fn ensure_indexes(db: &Database) -> anyhow::Result<()> {
    let email_idx = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(
            IndexOptions::builder()
                .name("email_unique_idx".to_string())
                .unique(true)
                .build(),
        )
        .build();
    db.collection::<Document>(USERS)
        .create_index(email_idx, None)
        .await
        .context("create users.email index")?;

    let owner_recency_idx = IndexModel::builder()
        .keys(doc! { "user_id": 1, "created_at": -1 })
        .options(
            IndexOptions::builder()
                .name("owner_recency_idx".to_string())
                .build(),
        )
        .build();
    db.collection::<Document>(CONTENTS)
        .create_index(owner_recency_idx, None)
        .await
        .context("create contents owner index")?;

    tracing::info!("mongodb indexes ensured");
    Ok(())
}
