//! Route definitions for the `/articles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::articles;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// GET    /articles       -> list_published (public)
/// POST   /articles       -> create_article (auth)
/// GET    /my-articles    -> list_mine (auth)
/// GET    /articles/{id}  -> get_article (optional auth)
/// PUT    /articles/{id}  -> update_article (author only)
/// DELETE /articles/{id}  -> delete_article (author only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/articles",
            get(articles::list_published).post(articles::create_article),
        )
        .route("/my-articles", get(articles::list_mine))
        .route(
            "/articles/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
}
