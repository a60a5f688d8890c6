//! Repository for the append-only `login_logs` table.

use async_trait::async_trait;

use crate::models::login_log::{CreateLoginLog, LoginLog};
use crate::PgStore;

const COLUMNS: &str = "id, user_id, username, success, ip, user_agent, created_at";

/// Audit trail of authentication attempts. There is no update or delete.
#[async_trait]
pub trait LoginLogRepository: Send + Sync {
    async fn append(&self, input: &CreateLoginLog) -> Result<LoginLog, sqlx::Error>;
}

#[async_trait]
impl LoginLogRepository for PgStore {
    async fn append(&self, input: &CreateLoginLog) -> Result<LoginLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO login_logs (user_id, username, success, ip, user_agent)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LoginLog>(&query)
            .bind(input.user_id)
            .bind(&input.username)
            .bind(input.success)
            .bind(&input.ip)
            .bind(&input.user_agent)
            .fetch_one(self.pool())
            .await
    }
}
