//! Route definitions for media uploads.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// POST /upload  -> upload_file (auth)
/// ```
///
/// `max_bytes` caps the request body; `None` lifts axum's default limit.
pub fn router(max_bytes: Option<usize>) -> Router<AppState> {
    let limit = match max_bytes {
        Some(bytes) => DefaultBodyLimit::max(bytes),
        None => DefaultBodyLimit::disable(),
    };

    Router::new().route("/upload", post(upload::upload_file).layer(limit))
}
