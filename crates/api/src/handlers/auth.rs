//! Handlers for registration and login.

use axum::extract::State;
use axum::Json;
use quill_core::error::CoreError;
use quill_core::types::DbId;
use quill_db::models::login_log::CreateLoginLog;
use quill_db::models::user::CreateUser;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password, PasswordConfig};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::origin::ClientOrigin;
use crate::state::AppState;

/// Message for both unknown usernames and wrong passwords.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/register` and `POST /api/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/register
///
/// Create an account and log it in immediately.
pub async fn register(
    State(state): State<AppState>,
    origin: ClientOrigin,
    ValidJson(input): ValidJson<CredentialsRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Reject taken usernames up front; the unique constraint covers races.
    if state.users.find_by_username(&input.username).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already exists".into(),
        )));
    }

    // 2. Hash off the async workers.
    let password_hash = hash_in_background(input.password, state.config.password.clone()).await?;

    // 3. Persist.
    let user = state
        .users
        .create(&CreateUser {
            username: input.username,
            password_hash,
        })
        .await?;
    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    // 4. Registration counts as a successful login.
    record_attempt(&state, Some(user.id), &user.username, true, origin).await?;

    issue(&state, user.id, user.username)
}

/// POST /api/login
///
/// Authenticate with username + password and return a session token.
pub async fn login(
    State(state): State<AppState>,
    origin: ClientOrigin,
    ValidJson(input): ValidJson<CredentialsRequest>,
) -> AppResult<Json<AuthResponse>> {
    let Some(user) = state.users.find_by_username(&input.username).await? else {
        record_attempt(&state, None, &input.username, false, origin).await?;
        tracing::info!(username = %input.username, "Login failed: unknown username");
        return Err(invalid_credentials());
    };

    let valid = verify_in_background(input.password, user.password_hash.clone()).await?;
    if !valid {
        record_attempt(&state, Some(user.id), &user.username, false, origin).await?;
        tracing::info!(user_id = user.id, "Login failed: wrong password");
        return Err(invalid_credentials());
    }

    record_attempt(&state, Some(user.id), &user.username, true, origin).await?;
    tracing::info!(user_id = user.id, "Login succeeded");

    issue(&state, user.id, user.username)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

fn issue(state: &AppState, user_id: DbId, username: String) -> AppResult<Json<AuthResponse>> {
    let token = generate_token(user_id, &username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(AuthResponse { token, username }))
}

async fn record_attempt(
    state: &AppState,
    user_id: Option<DbId>,
    username: &str,
    success: bool,
    origin: ClientOrigin,
) -> AppResult<()> {
    state
        .login_logs
        .append(&CreateLoginLog {
            user_id,
            username: username.to_string(),
            success,
            ip: origin.ip,
            user_agent: origin.user_agent,
        })
        .await?;
    Ok(())
}

async fn hash_in_background(password: String, config: PasswordConfig) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password, &config))
        .await
        .map_err(|e| AppError::InternalError(format!("spawn_blocking join error: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

async fn verify_in_background(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::InternalError(format!("spawn_blocking join error: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
}
