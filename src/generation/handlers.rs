use axum::{extract::State, routing::post, Json, Router};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tracing::{error, info, instrument};

use crate::{
    auth::extractors::AuthUser,
    contents::repo::{ContentKind, ContentRecord},
    error::ApiError,
    state::AppState,
};

use super::dto::{
    ImageGenerationRequest, ImageGenerationResponse, TextGenerationRequest,
    TextGenerationResponse,
};
use super::services::style_prompt;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate/text", post(generate_text))
        .route("/generate/image", post(generate_image))
}

#[instrument(skip(state, payload))]
pub async fn generate_text(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<TextGenerationRequest>,
) -> Result<Json<TextGenerationResponse>, ApiError> {
    if payload.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("Prompt is required".into()));
    }

    let system_prompt = style_prompt(payload.content_style.as_deref());
    let content = state
        .provider
        .generate_text(system_prompt, &payload.prompt)
        .await
        .map_err(|e| {
            error!(error = %e, "text generation failed");
            ApiError::Internal(anyhow::anyhow!(e))
        })?;

    let record = ContentRecord::new(
        claims.sub,
        ContentKind::Text,
        payload.prompt,
        content.clone(),
    );
    ContentRecord::insert(&state.db, &record).await?;

    info!(user_id = %claims.sub, content_id = %record.id, "text generated");
    Ok(Json(TextGenerationResponse {
        id: record.id,
        content,
        prompt: record.prompt,
        created_at: record.created_at,
    }))
}

#[instrument(skip(state, payload))]
pub async fn generate_image(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<ImageGenerationRequest>,
) -> Result<Json<ImageGenerationResponse>, ApiError> {
    if payload.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("Prompt is required".into()));
    }

    let image = state
        .provider
        .generate_image(&payload.prompt)
        .await
        .map_err(|e| {
            error!(error = %e, "image generation failed");
            ApiError::Internal(anyhow::anyhow!(e))
        })?;

    let image_base64 = BASE64.encode(&image);
    let record = ContentRecord::new(
        claims.sub,
        ContentKind::Image,
        payload.prompt,
        image_base64.clone(),
    );
    ContentRecord::insert(&state.db, &record).await?;

    info!(user_id = %claims.sub, content_id = %record.id, "image generated");
    Ok(Json(ImageGenerationResponse {
        id: record.id,
        image_base64,
        prompt: record.prompt,
        created_at: record.created_at,
    }))
}
