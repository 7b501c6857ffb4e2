use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::USERS;

/// User record in the document store. The id is assigned once at signup
/// and never changes; `_id` is left to the store and ignored on reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

fn collection(db: &Database) -> Collection<User> {
    db.collection(USERS)
}

impl User {
    pub fn new(email: String, password_hash: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Inserts the user, relying on the unique email index for atomicity.
    /// The raw store error is returned so the caller can tell a duplicate
    /// key apart from other failures.
    pub async fn insert(db: &Database, user: &User) -> mongodb::error::Result<()> {
        collection(db).insert_one(user, None).await?;
        Ok(())
    }

    pub async fn find_by_email(db: &Database, email: &str) -> anyhow::Result<Option<User>> {
        let user = collection(db).find_one(doc! { "email": email }, None).await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &Database, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = collection(db)
            .find_one(doc! { "id": id.to_string() }, None)
            .await?;
        Ok(user)
    }
}

pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_err)) if write_err.code == 11000
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_gets_fresh_id() {
        let a = User::new("a@x.com".into(), "h".into(), "A".into());
        let b = User::new("a@x.com".into(), "h".into(), "A".into());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn user_round_trips_through_bson() {
        let user = User::new("ann@example.com".into(), "$argon2id$h".into(), "Ann".into());
        let bson = mongodb::bson::to_document(&user).unwrap();
        // id and created_at are stored as plain strings, matching the lookup queries
        assert_eq!(
            bson.get_str("id").unwrap(),
            user.id.to_string()
        );
        assert!(bson.get_str("created_at").is_ok());

        let back: User = mongodb::bson::from_document(bson).unwrap();
        assert_eq!(back.id, user.id);
        assert_eq!(back.email, user.email);
        assert_eq!(back.password_hash, user.password_hash);
    }
}
