use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::state::AppState;

/// Identity facts embedded in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// A token is either valid or rejected; the two rejection reasons are kept
/// apart so they can be logged and reported distinctly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
}

#[derive(Clone)]
pub struct TokenKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig { secret, ttl_hours } = state.config.jwt.clone();
        Self::new(&secret, ttl_hours)
    }
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::from_secs((ttl_hours as u64) * 3600),
        }
    }

    pub fn issue(&self, user_id: Uuid, email: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "token issued");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::default();
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => {
                debug!(user_id = %data.claims.sub, "token verified");
                Ok(data.claims)
            }
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                warn!("token expired");
                Err(TokenError::Expired)
            }
            Err(e) => {
                warn!(error = %e, "token rejected");
                Err(TokenError::Invalid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> TokenKeys {
        TokenKeys::new("dev-secret", 24)
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id, "ann@example.com").expect("issue");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "ann@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn two_tokens_for_same_user_verify_to_same_id() {
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let first = keys.issue(user_id, "a@x.com").unwrap();
        let second = keys.issue(user_id, "a@x.com").unwrap();
        assert_eq!(keys.verify(&first).unwrap().sub, user_id);
        assert_eq!(keys.verify(&second).unwrap().sub, user_id);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let keys = make_keys();
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@x.com".into(),
            iat: (now - TimeDuration::hours(2)).unix_timestamp() as usize,
            exp: (now - TimeDuration::hours(1)).unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();
        assert_eq!(keys.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn tampered_token_is_rejected_as_invalid() {
        let keys = make_keys();
        let token = keys.issue(Uuid::new_v4(), "a@x.com").unwrap();

        // Flip a character in the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_eq!(keys.verify(&tampered).unwrap_err(), TokenError::Invalid);

        // Swap out the payload segment entirely
        let parts: Vec<&str> = token.split('.').collect();
        let forged = format!("{}.e30.{}", parts[0], parts[2]);
        assert_eq!(keys.verify(&forged).unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn token_from_other_secret_is_invalid() {
        let keys = make_keys();
        let other = TokenKeys::new("other-secret", 24);
        let token = other.issue(Uuid::new_v4(), "a@x.com").unwrap();
        assert_eq!(keys.verify(&token).unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn garbage_is_invalid_not_expired() {
        let keys = make_keys();
        assert_eq!(
            keys.verify("not.a.token").unwrap_err(),
            TokenError::Invalid
        );
    }
}
