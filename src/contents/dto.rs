use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::{ContentKind, ContentRecord};

#[derive(Debug, Deserialize)]
pub struct HistoryFilter {
    pub content_type: Option<ContentKind>,
}

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub id: Uuid,
    pub content_type: ContentKind,
    pub prompt: String,
    pub result: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<ContentRecord> for ContentResponse {
    fn from(record: ContentRecord) -> Self {
        Self {
            id: record.id,
            content_type: record.content_type,
            prompt: record.prompt,
            result: record.result,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_drops_owner_id() {
        let record = ContentRecord::new(
            Uuid::new_v4(),
            ContentKind::Text,
            "prompt".into(),
            "result".into(),
        );
        let json = serde_json::to_value(ContentResponse::from(record)).unwrap();
        assert!(json.get("user_id").is_none());
        assert_eq!(json["content_type"], "text");
    }
}
