use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::extractors::AuthUser, error::ApiError, state::AppState};

use super::dto::{ContentResponse, HistoryFilter, MessageResponse};
use super::repo::ContentRecord;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contents", get(list_contents))
        .route("/contents/:id", get(get_content).delete(delete_content))
}

#[instrument(skip(state))]
pub async fn list_contents(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(filter): Query<HistoryFilter>,
) -> Result<Json<Vec<ContentResponse>>, ApiError> {
    let records = ContentRecord::list_by_owner(&state.db, claims.sub, filter.content_type).await?;
    Ok(Json(records.into_iter().map(ContentResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_content(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentResponse>, ApiError> {
    let record = ContentRecord::find_by_id(&state.db, claims.sub, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Content not found".into()))?;
    Ok(Json(ContentResponse::from(record)))
}

#[instrument(skip(state))]
pub async fn delete_content(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = ContentRecord::delete_by_id(&state.db, claims.sub, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Content not found".into()));
    }
    info!(user_id = %claims.sub, content_id = %id, "content deleted");
    Ok(Json(MessageResponse {
        message: "Content deleted successfully",
    }))
}
