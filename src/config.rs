use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub mongo_url: String,
    pub db_name: String,
    pub jwt: JwtConfig,
    pub llm: LlmConfig,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mongo_url = std::env::var("MONGO_URL")?;
        let db_name = std::env::var("DB_NAME")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
        };
        let llm = LlmConfig {
            api_key: std::env::var("LLM_API_KEY")?,
            base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            text_model: std::env::var("LLM_TEXT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
            image_model: std::env::var("LLM_IMAGE_MODEL")
                .unwrap_or_else(|_| "gpt-image-1".into()),
        };
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(Self {
            mongo_url,
            db_name,
            jwt,
            llm,
            cors_origins,
        })
    }
}
