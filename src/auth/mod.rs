use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod token;
pub(crate) mod extractors;

pub fn router() -> Router<AppState> {
    handlers::router()
}
