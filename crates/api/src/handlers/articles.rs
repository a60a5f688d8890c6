//! Handlers for the `/articles` resource.
//!
//! Reads of published articles are public; drafts and all writes go through
//! the access policy in [`quill_core::access`].

use axum::extract::State;
use axum::Json;
use quill_core::access::{check_modify, check_read};
use quill_core::article::ArticleStatus;
use quill_core::error::CoreError;
use quill_core::types::{DbId, Timestamp};
use quill_db::models::article::{Article, ArticleSummary, CreateArticle, UpdateArticle};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, ValidJson};
use crate::middleware::auth::{AuthUser, Viewer};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/articles`.
///
/// `status` is free-form on the wire; only `"PUBLISHED"` publishes.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    pub status: Option<String>,
    pub cover_url: Option<String>,
}

/// Request body for `PUT /api/articles/{id}`. Omitted or null fields are kept.
///
/// An empty `coverUrl` removes the cover.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
    pub status: Option<String>,
    pub cover_url: Option<String>,
}

impl From<UpdateArticleRequest> for UpdateArticle {
    fn from(req: UpdateArticleRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            status: req.status.as_deref().map(ArticleStatus::from_input),
            cover_url: req.cover_url.map(|url| Some(url).filter(|u| !u.is_empty())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthorInfo {
    pub username: String,
}

/// Full article representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub status: ArticleStatus,
    pub cover_url: Option<String>,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author: AuthorInfo,
}

impl From<Article> for ArticleResponse {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            title: a.title,
            content: a.content,
            status: a.status,
            cover_url: a.cover_url,
            author_id: a.author_id,
            created_at: a.created_at,
            updated_at: a.updated_at,
            author: AuthorInfo {
                username: a.author_username,
            },
        }
    }
}

/// Listing representation of a published article (no body).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummaryResponse {
    pub id: DbId,
    pub title: String,
    pub cover_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author: AuthorInfo,
}

impl From<ArticleSummary> for ArticleSummaryResponse {
    fn from(a: ArticleSummary) -> Self {
        Self {
            id: a.id,
            title: a.title,
            cover_url: a.cover_url,
            created_at: a.created_at,
            updated_at: a.updated_at,
            author: AuthorInfo {
                username: a.author_username,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/articles
pub async fn create_article(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateArticleRequest>,
) -> AppResult<Json<ArticleResponse>> {
    let article = state
        .articles
        .create(&CreateArticle {
            title: input.title,
            content: input.content,
            status: ArticleStatus::from_optional_input(input.status.as_deref()),
            cover_url: input.cover_url.filter(|u| !u.is_empty()),
            author_id: auth.user_id,
        })
        .await?;

    tracing::info!(
        article_id = article.id,
        user_id = auth.user_id,
        status = %article.status,
        "Article created"
    );
    Ok(Json(article.into()))
}

/// GET /api/articles
///
/// All published articles, newest first.
pub async fn list_published(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ArticleSummaryResponse>>> {
    let articles = state.articles.list_published().await?;
    Ok(Json(articles.into_iter().map(Into::into).collect()))
}

/// GET /api/my-articles
///
/// Every article owned by the caller, any status, newest first.
pub async fn list_mine(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ArticleResponse>>> {
    let articles = state.articles.list_by_author(auth.user_id).await?;
    Ok(Json(articles.into_iter().map(Into::into).collect()))
}

/// GET /api/articles/{id}
pub async fn get_article(
    IdPath(id): IdPath,
    Viewer(caller): Viewer,
    State(state): State<AppState>,
) -> AppResult<Json<ArticleResponse>> {
    let article = find_article(&state, id).await?;
    check_read(article.status, article.author_id, caller)?;
    Ok(Json(article.into()))
}

/// PUT /api/articles/{id}
///
/// Partial update; only the author may edit.
pub async fn update_article(
    IdPath(id): IdPath,
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<UpdateArticleRequest>,
) -> AppResult<Json<ArticleResponse>> {
    let existing = find_article(&state, id).await?;
    check_modify(existing.author_id, auth.user_id)?;

    // The row can vanish between the read and the write.
    let article = state
        .articles
        .update(id, &input.into())
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(article_id = id, user_id = auth.user_id, "Article updated");
    Ok(Json(article.into()))
}

/// DELETE /api/articles/{id}
///
/// Hard delete; only the author may delete.
pub async fn delete_article(
    IdPath(id): IdPath,
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DeleteResponse>> {
    let existing = find_article(&state, id).await?;
    check_modify(existing.author_id, auth.user_id)?;

    if !state.articles.delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(article_id = id, user_id = auth.user_id, "Article deleted");
    Ok(Json(DeleteResponse { success: true }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Article",
        id,
    })
}

async fn find_article(state: &AppState, id: DbId) -> AppResult<Article> {
    state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))
}
