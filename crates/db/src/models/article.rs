//! Article entity models and DTOs.

use quill_core::article::ArticleStatus;
use quill_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full article row joined with its author's username.
#[derive(Debug, Clone, FromRow)]
pub struct Article {
    pub id: DbId,
    pub title: String,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub status: ArticleStatus,
    pub cover_url: Option<String>,
    pub author_id: DbId,
    pub author_username: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List projection of a published article (no body).
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ArticleSummary {
    pub id: DbId,
    pub title: String,
    pub cover_url: Option<String>,
    pub author_username: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an article. `author_id` always comes from the session.
#[derive(Debug, Clone)]
pub struct CreateArticle {
    pub title: String,
    pub content: String,
    pub status: ArticleStatus,
    pub cover_url: Option<String>,
    pub author_id: DbId,
}

/// DTO for a partial update. `None` leaves the column untouched.
///
/// `cover_url` is doubly optional: `Some(None)` clears the cover.
#[derive(Debug, Clone, Default)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<ArticleStatus>,
    pub cover_url: Option<Option<String>>,
}
