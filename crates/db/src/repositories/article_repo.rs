//! Repository for the `articles` table.
//!
//! Every query joins `users` so rows carry the author's username.

use async_trait::async_trait;
use quill_core::article::{ArticleStatus, STATUS_PUBLISHED};
use quill_core::types::DbId;

use crate::models::article::{Article, ArticleSummary, CreateArticle, UpdateArticle};
use crate::PgStore;

/// Full projection. Expects the article aliased as `a` and the author as `u`.
const COLUMNS: &str = "a.id, a.title, a.content, a.status, a.cover_url, a.author_id, \
                       u.username AS author_username, a.created_at, a.updated_at";

/// List projection for public listings (no body).
const SUMMARY_COLUMNS: &str =
    "a.id, a.title, a.cover_url, u.username AS author_username, a.created_at, a.updated_at";

/// Newest first; id breaks ties so repeated listings are stable.
const NEWEST_FIRST: &str = "ORDER BY a.created_at DESC, a.id DESC";

/// Article storage.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn create(&self, input: &CreateArticle) -> Result<Article, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Article>, sqlx::Error>;

    /// All published articles, newest first.
    async fn list_published(&self) -> Result<Vec<ArticleSummary>, sqlx::Error>;

    /// All articles by one author regardless of status, newest first.
    async fn list_by_author(&self, author_id: DbId) -> Result<Vec<Article>, sqlx::Error>;

    /// Apply a partial update and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    async fn update(&self, id: DbId, input: &UpdateArticle)
        -> Result<Option<Article>, sqlx::Error>;

    /// Hard-delete an article. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl ArticleRepository for PgStore {
    async fn create(&self, input: &CreateArticle) -> Result<Article, sqlx::Error> {
        let query = format!(
            "WITH a AS (
                INSERT INTO articles (title, content, status, cover_url, author_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
             )
             SELECT {COLUMNS} FROM a JOIN users u ON u.id = a.author_id"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.status.as_str())
            .bind(&input.cover_url)
            .bind(input.author_id)
            .fetch_one(self.pool())
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles a JOIN users u ON u.id = a.author_id
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn list_published(&self) -> Result<Vec<ArticleSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM articles a JOIN users u ON u.id = a.author_id
             WHERE a.status = $1
             {NEWEST_FIRST}"
        );
        sqlx::query_as::<_, ArticleSummary>(&query)
            .bind(STATUS_PUBLISHED)
            .fetch_all(self.pool())
            .await
    }

    async fn list_by_author(&self, author_id: DbId) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles a JOIN users u ON u.id = a.author_id
             WHERE a.author_id = $1
             {NEWEST_FIRST}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(author_id)
            .fetch_all(self.pool())
            .await
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "WITH a AS (
                UPDATE articles SET
                    title = COALESCE($2, title),
                    content = COALESCE($3, content),
                    status = COALESCE($4, status),
                    cover_url = CASE WHEN $5 THEN $6 ELSE cover_url END,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM a JOIN users u ON u.id = a.author_id"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.status.map(ArticleStatus::as_str))
            .bind(input.cover_url.is_some())
            .bind(input.cover_url.clone().flatten())
            .fetch_optional(self.pool())
            .await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
