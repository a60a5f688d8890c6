//! First-boot account seeding.

use quill_db::models::user::{CreateUser, User};
use quill_db::repositories::UserRepository;

use crate::auth::password::{hash_password, PasswordConfig};
use crate::config::SeedConfig;
use crate::error::{AppError, AppResult};

/// Create the seed account if no user exists yet.
///
/// Returns the created user, or `None` when the store already has users.
pub async fn seed_initial_user(
    users: &dyn UserRepository,
    seed: &SeedConfig,
    password: &PasswordConfig,
) -> AppResult<Option<User>> {
    if users.count().await? > 0 {
        return Ok(None);
    }

    let password_hash = hash_password(&seed.password, password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = users
        .create(&CreateUser {
            username: seed.username.clone(),
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Seeded initial user");
    Ok(Some(user))
}
