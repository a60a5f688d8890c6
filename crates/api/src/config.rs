use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;
use crate::auth::password::PasswordConfig;

/// Deployment environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    /// `production` (case-insensitive) selects [`AppEnv::Production`];
    /// anything else, including an unset variable, is development.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

/// Default seed account for a fresh development database.
const DEV_SEED_USERNAME: &str = "admin";
const DEV_SEED_PASSWORD: &str = "123456";

/// Credentials for the account created when the `users` table is empty.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub username: String,
    pub password: String,
}

impl SeedConfig {
    /// Development falls back to `admin` / `123456`; production only seeds
    /// when `SEED_ADMIN_PASSWORD` is set explicitly.
    pub fn from_env(env: AppEnv) -> Option<Self> {
        let username =
            std::env::var("SEED_ADMIN_USERNAME").unwrap_or_else(|_| DEV_SEED_USERNAME.into());

        match std::env::var("SEED_ADMIN_PASSWORD") {
            Ok(password) if !password.is_empty() => Some(Self { username, password }),
            _ if env.is_production() => None,
            _ => Some(Self {
                username,
                password: DEV_SEED_PASSWORD.into(),
            }),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    pub env: AppEnv,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Token signing secret and lifetime.
    pub jwt: JwtConfig,
    /// Argon2 cost parameters for new password hashes.
    pub password: PasswordConfig,
    /// Directory uploaded files are written to and served from.
    pub upload_dir: PathBuf,
    /// Request body limit for uploads in bytes; `None` disables the limit.
    pub upload_max_bytes: Option<usize>,
    pub seed: Option<SeedConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default                 |
    /// |--------------------|-------------------------|
    /// | `HOST`             | `0.0.0.0`               |
    /// | `PORT`             | `3001`                  |
    /// | `APP_ENV`          | `development`           |
    /// | `CORS_ORIGINS`     | `http://localhost:5173` |
    /// | `UPLOAD_DIR`       | `uploads`               |
    /// | `UPLOAD_MAX_BYTES` | unlimited               |
    ///
    /// See [`JwtConfig::from_env`], [`PasswordConfig::from_env`] and
    /// [`SeedConfig::from_env`] for the remaining variables.
    ///
    /// # Panics
    ///
    /// Panics on unparsable values, and in production when the signing secret
    /// is missing or left at its development default.
    pub fn from_env() -> Self {
        let env = AppEnv::parse(std::env::var("APP_ENV").ok().as_deref());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

        let upload_max_bytes = std::env::var("UPLOAD_MAX_BYTES").ok().map(|v| {
            v.parse::<usize>()
                .expect("UPLOAD_MAX_BYTES must be a valid usize")
        });

        Self {
            host,
            port,
            env,
            cors_origins,
            jwt: JwtConfig::from_env(env),
            password: PasswordConfig::from_env(),
            upload_dir,
            upload_max_bytes,
            seed: SeedConfig::from_env(env),
        }
    }
}
