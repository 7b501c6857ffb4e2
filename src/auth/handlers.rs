use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, SignupRequest, TokenResponse, UserProfile},
        extractors::AuthUser,
        password::{hash_password, verify_password},
        repo::{is_duplicate_key, User},
        token::TokenKeys,
    },
    error::ApiError,
    state::AppState,
};

/// Unknown email and wrong password collapse to this one message so a
/// caller cannot probe which accounts exist.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.email = payload.email.trim().to_string();

    if !is_valid_email(&payload.email) {
        warn!("invalid signup email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::BadRequest("Password too short".into()));
    }
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name is required".into()));
    }

    // Argon2 is CPU-bound, keep it off the async workers
    let password = payload.password;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))??;

    let user = User::new(payload.email, hash, payload.name.trim().to_string());

    // The unique email index makes this the authoritative duplicate check
    match User::insert(&state.db, &user).await {
        Ok(()) => {}
        Err(e) if is_duplicate_key(&e) => {
            warn!(email = %user.email, "email already registered");
            return Err(ApiError::Conflict("Email already registered".into()));
        }
        Err(e) => {
            error!(error = %e, "insert user failed");
            return Err(e.into());
        }
    }

    let keys = TokenKeys::from_ref(&state);
    let token = keys.issue(user.id, &user.email)?;

    info!(user_id = %user.id, "user signed up");
    Ok(Json(TokenResponse::bearer(token, UserProfile::from(user))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.email = payload.email.trim().to_string();

    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!("login unknown email");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.into()));
        }
    };

    let password = payload.password;
    let stored_hash = user.password_hash.clone();
    let ok = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;

    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    let keys = TokenKeys::from_ref(&state);
    let token = keys.issue(user.id, &user.email)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse::bearer(token, UserProfile::from(user))))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %claims.sub, "token resolves to no stored user");
            ApiError::NotFound("User not found".into())
        })?;

    Ok(Json(UserProfile::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("ann@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two words@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn unknown_email_and_wrong_password_share_one_payload() {
        // Both login failure branches construct from the same constant,
        // so the serialized payloads cannot drift apart.
        let unknown_email = ApiError::Unauthorized(INVALID_CREDENTIALS.into());
        let wrong_password = ApiError::Unauthorized(INVALID_CREDENTIALS.into());
        assert_eq!(unknown_email.to_string(), wrong_password.to_string());
    }
}
