use std::sync::Arc;

use mongodb::Database;

use crate::config::AppConfig;
use crate::db;
use crate::provider::{GenerationProvider, OpenAiProvider};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
    pub provider: Arc<dyn GenerationProvider>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config).await?;
        db::ensure_indexes(&db).await?;

        let provider = Arc::new(OpenAiProvider::new(&config.llm)?) as Arc<dyn GenerationProvider>;

        Ok(Self {
            db,
            config,
            provider,
        })
    }

    pub fn from_parts(
        db: Database,
        config: Arc<AppConfig>,
        provider: Arc<dyn GenerationProvider>,
    ) -> Self {
        Self {
            db,
            config,
            provider,
        }
    }

    pub fn fake() -> Self {
        use crate::config::{JwtConfig, LlmConfig};
        use crate::provider::ProviderError;
        use axum::async_trait;
        use bytes::Bytes;
        use mongodb::options::{ClientOptions, ServerAddress};

        #[derive(Clone)]
        struct FakeProvider;
        #[async_trait]
        impl GenerationProvider for FakeProvider {
            async fn generate_text(
                &self,
                _system_prompt: &str,
                prompt: &str,
            ) -> Result<String, ProviderError> {
                Ok(format!("generated: {}", prompt))
            }
            async fn generate_image(&self, _prompt: &str) -> Result<Bytes, ProviderError> {
                Ok(Bytes::from_static(b"\x89PNG\r\n"))
            }
        }

        // Lazy client, no connection is made until a collection is touched
        let options = ClientOptions::builder()
            .hosts(vec![ServerAddress::Tcp {
                host: "localhost".into(),
                port: Some(27017),
            }])
            .build();
        let client = mongodb::Client::with_options(options).expect("lazy mongo client");
        let db = client.database("contentcraft_test");

        let config = Arc::new(AppConfig {
            mongo_url: "mongodb://localhost:27017".into(),
            db_name: "contentcraft_test".into(),
            jwt: JwtConfig {
                secret: "test-secret".into(),
                ttl_hours: 24,
            },
            llm: LlmConfig {
                api_key: "test".into(),
                base_url: "https://fake.local/v1".into(),
                text_model: "fake-text".into(),
                image_model: "fake-image".into(),
            },
            cors_origins: vec!["*".into()],
        });

        let provider = Arc::new(FakeProvider) as Arc<dyn GenerationProvider>;
        Self {
            db,
            config,
            provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fake_provider_round_trip() {
        let state = AppState::fake();
        let text = state
            .provider
            .generate_text("system", "hello")
            .await
            .unwrap();
        assert_eq!(text, "generated: hello");

        let image = state.provider.generate_image("a cat").await.unwrap();
        assert!(!image.is_empty());
    }
}
