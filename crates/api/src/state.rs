use std::sync::Arc;

use quill_db::repositories::{ArticleRepository, LoginLogRepository, UserRepository};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every field is behind an `Arc`. Storage is held as
/// trait objects so the binary can wire [`quill_db::PgStore`] while tests
/// wire an in-memory implementation.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub users: Arc<dyn UserRepository>,
    pub articles: Arc<dyn ArticleRepository>,
    pub login_logs: Arc<dyn LoginLogRepository>,
}

impl AppState {
    /// Build state from a single store implementing every repository.
    pub fn new<S>(config: ServerConfig, store: Arc<S>) -> Self
    where
        S: UserRepository + ArticleRepository + LoginLogRepository + 'static,
    {
        Self {
            config: Arc::new(config),
            users: store.clone(),
            articles: store.clone(),
            login_logs: store,
        }
    }
}
