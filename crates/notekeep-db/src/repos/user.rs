use crate::errors::{StoreError, StoreResult};
use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

pub struct UserRepo;

impl UserRepo {
    /// Insert a user and return its id. A second user with the same
    /// username fails with `StoreError::UsernameTaken`.
    pub async fn create(pool: &PgPool, username: &str, password_hash: &str) -> StoreResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await;

        match result {
            Ok(id) => Ok(id),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::UsernameTaken)
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context("Failed to create user")
                .into()),
        }
    }

    /// Find the user whose username and password digest both match.
    pub async fn get_by_credentials(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
    ) -> StoreResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1 AND password_hash = $2",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by credentials")?;
        Ok(row)
    }
}
