use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::token::{Claims, TokenError, TokenKeys};
use crate::error::ApiError;

/// Extracts and verifies the bearer token, short-circuiting the handler
/// with 401 on any failure.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = TokenKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

        let claims = keys.verify(token).map_err(|e| {
            warn!(reason = %e, "request rejected");
            match e {
                TokenError::Expired => ApiError::Unauthorized("Token has expired".to_string()),
                TokenError::Invalid => ApiError::Unauthorized("Invalid token".to_string()),
            }
        })?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::AUTHORIZATION, Request};
    use uuid::Uuid;

    fn keys() -> TokenKeys {
        TokenKeys::new("test-secret", 24)
    }

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/auth/me");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn accepts_valid_bearer_token() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id, "ann@example.com").unwrap();
        let mut parts = parts_with_header(Some(&format!("Bearer {}", token)));
        let AuthUser(claims) = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .expect("extractor should accept");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "ann@example.com");
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        let mut parts = parts_with_header(None);
        let err = AuthUser::from_request_parts(&mut parts, &keys())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn rejects_non_bearer_scheme() {
        let mut parts = parts_with_header(Some("Basic dXNlcjpwdw=="));
        let err = AuthUser::from_request_parts(&mut parts, &keys())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn rejects_garbage_token() {
        let mut parts = parts_with_header(Some("Bearer not-a-token"));
        let err = AuthUser::from_request_parts(&mut parts, &keys())
            .await
            .unwrap_err();
        match err {
            ApiError::Unauthorized(msg) => assert_eq!(msg, "Invalid token"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
