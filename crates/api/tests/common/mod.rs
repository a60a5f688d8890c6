//! Shared fixtures for the HTTP integration tests.
//!
//! The app under test is built with [`build_app_router`], so every request
//! goes through the production middleware stack. Storage is an in-memory
//! implementation of the repository traits; the PostgreSQL implementation is
//! covered separately by `quill-db`'s own tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use quill_core::article::ArticleStatus;
use quill_core::types::DbId;
use tower::ServiceExt;

use quill_api::auth::jwt::JwtConfig;
use quill_api::auth::password::PasswordConfig;
use quill_api::config::{AppEnv, ServerConfig};
use quill_api::router::build_app_router;
use quill_api::state::AppState;
use quill_db::models::article::{Article, ArticleSummary, CreateArticle, UpdateArticle};
use quill_db::models::login_log::{CreateLoginLog, LoginLog};
use quill_db::models::user::{CreateUser, User};
use quill_db::repositories::{ArticleRepository, LoginLogRepository, UserRepository};

pub const TEST_SECRET: &str = "integration-test-secret";

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct ArticleRow {
    id: DbId,
    title: String,
    content: String,
    status: ArticleStatus,
    cover_url: Option<String>,
    author_id: DbId,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    articles: Vec<ArticleRow>,
    login_logs: Vec<LoginLog>,
    next_id: DbId,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn author_username(&self, author_id: DbId) -> String {
        self.users
            .iter()
            .find(|u| u.id == author_id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }

    fn to_article(&self, row: &ArticleRow) -> Article {
        Article {
            id: row.id,
            title: row.title.clone(),
            content: row.content.clone(),
            status: row.status,
            cover_url: row.cover_url.clone(),
            author_id: row.author_id,
            author_username: self.author_username(row.author_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    /// Rows sorted newest first, ties broken by id.
    fn articles_newest_first(&self) -> Vec<&ArticleRow> {
        let mut rows: Vec<&ArticleRow> = self.articles.iter().collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows
    }
}

/// Repository implementation backed by vectors behind a mutex.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Snapshot of every login attempt recorded so far, oldest first.
    pub fn login_logs(&self) -> Vec<LoginLog> {
        self.tables.lock().unwrap().login_logs.clone()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let user = User {
            id: tables.next_id(),
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        Ok(self.tables.lock().unwrap().users.len() as i64)
    }
}

#[async_trait]
impl ArticleRepository for MemoryStore {
    async fn create(&self, input: &CreateArticle) -> Result<Article, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let row = ArticleRow {
            id: tables.next_id(),
            title: input.title.clone(),
            content: input.content.clone(),
            status: input.status,
            cover_url: input.cover_url.clone(),
            author_id: input.author_id,
            created_at: now,
            updated_at: now,
        };
        let article = tables.to_article(&row);
        tables.articles.push(row);
        Ok(article)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .articles
            .iter()
            .find(|a| a.id == id)
            .map(|row| tables.to_article(row)))
    }

    async fn list_published(&self) -> Result<Vec<ArticleSummary>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .articles_newest_first()
            .into_iter()
            .filter(|a| a.status.is_published())
            .map(|row| ArticleSummary {
                id: row.id,
                title: row.title.clone(),
                cover_url: row.cover_url.clone(),
                author_username: tables.author_username(row.author_id),
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
            .collect())
    }

    async fn list_by_author(&self, author_id: DbId) -> Result<Vec<Article>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .articles_newest_first()
            .into_iter()
            .filter(|a| a.author_id == author_id)
            .map(|row| tables.to_article(row))
            .collect())
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let Some(row) = tables.articles.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        if let Some(title) = &input.title {
            row.title = title.clone();
        }
        if let Some(content) = &input.content {
            row.content = content.clone();
        }
        if let Some(status) = input.status {
            row.status = status;
        }
        if let Some(cover_url) = &input.cover_url {
            row.cover_url = cover_url.clone();
        }
        row.updated_at = Utc::now();

        let row = row.clone();
        Ok(Some(tables.to_article(&row)))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.articles.len();
        tables.articles.retain(|a| a.id != id);
        Ok(tables.articles.len() < before)
    }
}

#[async_trait]
impl LoginLogRepository for MemoryStore {
    async fn append(&self, input: &CreateLoginLog) -> Result<LoginLog, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let log = LoginLog {
            id: tables.next_id(),
            user_id: input.user_id,
            username: input.username.clone(),
            success: input.success,
            ip: input.ip.clone(),
            user_agent: input.user_agent.clone(),
            created_at: Utc::now(),
        };
        tables.login_logs.push(log.clone());
        Ok(log)
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with cheap hashing and a fixed signing secret.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        env: AppEnv::Development,
        cors_origins: vec!["http://localhost:5173".to_string()],
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiry_mins: 120,
        },
        password: cheap_password_config(),
        upload_dir: upload_dir.to_path_buf(),
        upload_max_bytes: None,
        seed: None,
    }
}

/// Lowest Argon2 cost the library accepts.
pub fn cheap_password_config() -> PasswordConfig {
    PasswordConfig::new(argon2::Params::MIN_M_COST, 1, 1).expect("valid argon2 params")
}

/// A router wired to a fresh [`MemoryStore`] plus the store for inspection.
///
/// The returned `TempDir` owns the upload directory; keep it alive for the
/// duration of the test.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub upload_dir: tempfile::TempDir,
}

impl TestApp {
    /// A cheap clone of the router for a single `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(|_| {})
}

/// Like [`build_test_app`], with a hook to adjust the config first.
pub fn build_test_app_with(adjust: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("create temp upload dir");
    let mut config = test_config(upload_dir.path());
    adjust(&mut config);

    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(config, store.clone());

    TestApp {
        router: build_app_router(state),
        store,
        upload_dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("read response body")
        .to_bytes()
        .to_vec()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router is infallible")
}

fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request("POST", uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request("POST", uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request("PUT", uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

/// Send an arbitrary prepared request.
pub async fn request(app: Router, request: Request<Body>) -> Response {
    send(app, request).await
}

/// Register `username` and return its token.
pub async fn register(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/register", body).await;
    assert_eq!(response.status(), StatusCode::OK, "registration of {username} failed");
    let json = body_json(response).await;
    json["token"].as_str().expect("token in response").to_string()
}

/// Create an article through the API and return its JSON.
pub async fn create_article(
    app: Router,
    token: &str,
    title: &str,
    status: &str,
) -> serde_json::Value {
    let body = serde_json::json!({
        "title": title,
        "content": format!("Body of {title}"),
        "status": status,
    });
    let response = post_json_auth(app, "/api/articles", body, token).await;
    assert_eq!(response.status(), StatusCode::OK, "creating {title} failed");
    body_json(response).await
}
