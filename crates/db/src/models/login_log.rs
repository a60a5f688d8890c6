//! Login attempt log. Rows are immutable once written.

use quill_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A single login (or registration) attempt.
#[derive(Debug, Clone, FromRow)]
pub struct LoginLog {
    pub id: DbId,
    /// `None` when the username did not match any account.
    pub user_id: Option<DbId>,
    pub username: String,
    pub success: bool,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending a login attempt.
#[derive(Debug, Clone)]
pub struct CreateLoginLog {
    pub user_id: Option<DbId>,
    pub username: String,
    pub success: bool,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}
