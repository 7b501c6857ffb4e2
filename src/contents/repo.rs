use futures::TryStreamExt;
use mongodb::{bson::doc, options::FindOptions, Collection, Database};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::CONTENTS;

/// Kind of generated artifact a record holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Image,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Image => "image",
        }
    }
}

/// Generated artifact, owned by exactly one user. Every query below is
/// scoped by `user_id`; there is no path to another user's records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_type: ContentKind,
    pub prompt: String,
    pub result: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

fn collection(db: &Database) -> Collection<ContentRecord> {
    db.collection(CONTENTS)
}

impl ContentRecord {
    pub fn new(user_id: Uuid, content_type: ContentKind, prompt: String, result: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            content_type,
            prompt,
            result,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub async fn insert(db: &Database, record: &ContentRecord) -> anyhow::Result<()> {
        collection(db).insert_one(record, None).await?;
        Ok(())
    }

    /// Newest first, capped at 100 records.
    pub async fn list_by_owner(
        db: &Database,
        user_id: Uuid,
        kind: Option<ContentKind>,
    ) -> anyhow::Result<Vec<ContentRecord>> {
        let mut filter = doc! { "user_id": user_id.to_string() };
        if let Some(kind) = kind {
            filter.insert("content_type", kind.as_str());
        }
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .limit(100)
            .build();
        let records = collection(db)
            .find(filter, options)
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }

    pub async fn find_by_id(
        db: &Database,
        user_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<ContentRecord>> {
        let record = collection(db)
            .find_one(
                doc! { "id": id.to_string(), "user_id": user_id.to_string() },
                None,
            )
            .await?;
        Ok(record)
    }

    /// Returns false when nothing matched, which covers both a missing
    /// record and one owned by someone else.
    pub async fn delete_by_id(db: &Database, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = collection(db)
            .delete_one(
                doc! { "id": id.to_string(), "user_id": user_id.to_string() },
                None,
            )
            .await?;
        Ok(result.deleted_count > 0)
    }
}
