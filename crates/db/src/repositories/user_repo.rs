//! Repository for the `users` table.

use async_trait::async_trait;

use crate::models::user::{CreateUser, User};
use crate::PgStore;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, created_at";

/// Credential storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate username fails with the `uq_users_username` constraint.
    async fn create(&self, input: &CreateUser) -> Result<User, sqlx::Error>;

    /// Find a user by username (case-sensitive).
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;

    /// Total number of registered users.
    async fn count(&self) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create(&self, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(self.pool())
            .await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(self.pool())
            .await
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool())
            .await
    }
}
