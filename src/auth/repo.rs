use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub image_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Find a user by username.
    pub async fn find_by_username(db: &PgPool, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, image_url, bio, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    /// Find a user by id.
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, image_url, bio, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a new user with an already-hashed password. Runs in a
    /// transaction so a uniqueness violation leaves no partial row.
    pub async fn create(
        db: &PgPool,
        username: &str,
        password_hash: &str,
        image_url: Option<&str>,
        bio: Option<&str>,
    ) -> sqlx::Result<User> {
        let mut tx = db.begin().await?;
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, image_url, bio)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, image_url, bio, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(image_url)
        .bind(bio)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            username: "chef".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            image_url: None,
            bio: Some("home cook".into()),
            created_at: OffsetDateTime::now_utc(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
        assert!(json.contains("chef"));
    }
}
