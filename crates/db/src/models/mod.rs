pub mod article;
pub mod login_log;
pub mod user;
