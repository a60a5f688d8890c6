pub mod articles;
pub mod auth;
pub mod health;
pub mod upload;

use axum::routing::get;
use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /ping                  liveness (public)
///
/// /register              create account (public)
/// /login                 log in (public)
///
/// /articles              list published, create
/// /my-articles           caller's articles
/// /articles/{id}         get, update, delete
///
/// /upload                media upload
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route("/ping", get(health::ping))
        .merge(auth::router())
        .merge(articles::router())
        .merge(upload::router(config.upload_max_bytes))
}
