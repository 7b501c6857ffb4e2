use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::User;

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// Response returned after signup or login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserProfile,
}

impl TokenResponse {
    pub fn bearer(access_token: String, user: UserProfile) -> Self {
        Self {
            access_token,
            token_type: "bearer",
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_never_carries_password_hash() {
        let user = User::new(
            "ann@example.com".into(),
            "$argon2id$fake".into(),
            "Ann".into(),
        );
        let profile = UserProfile::from(user);
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ann@example.com");
        assert_eq!(json["name"], "Ann");
    }

    #[test]
    fn token_response_is_bearer() {
        let user = User::new("a@x.com".into(), "h".into(), "A".into());
        let response = TokenResponse::bearer("tok".into(), user.into());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["access_token"], "tok");
    }
}
