use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct TextGenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub content_style: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TextGenerationResponse {
    pub id: Uuid,
    pub content: String,
    pub prompt: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ImageGenerationResponse {
    pub id: Uuid,
    pub image_base64: String,
    pub prompt: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_style_defaults_to_none() {
        let req: TextGenerationRequest =
            serde_json::from_str(r#"{"prompt":"write about rust"}"#).unwrap();
        assert_eq!(req.prompt, "write about rust");
        assert!(req.content_style.is_none());
    }
}
