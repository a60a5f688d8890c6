//! Repository traits and their PostgreSQL implementations.
//!
//! Each trait is object-safe (via `async_trait`) so application state can hold
//! `Arc<dyn …>` handles and tests can substitute their own storage.

mod article_repo;
mod login_log_repo;
mod user_repo;

pub use article_repo::ArticleRepository;
pub use login_log_repo::LoginLogRepository;
pub use user_repo::UserRepository;
