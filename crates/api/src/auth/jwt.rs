//! Session token issuing and verification.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. They are not
//! stored anywhere: a token stays valid until `exp`, even after the user logs
//! out or changes password.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use quill_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::config::AppEnv;

/// Signing secret used when `JWT_SECRET` is unset. Development only.
pub const INSECURE_DEFAULT_SECRET: &str = "dev_secret_change_me";

/// Default token lifetime in minutes (two hours).
const DEFAULT_EXPIRY_MINS: i64 = 120;

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The user's internal database id.
    #[serde(rename = "userId")]
    pub user_id: DbId,
    pub username: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes.
    pub expiry_mins: i64,
}

impl JwtConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var           | Default                |
    /// |-------------------|------------------------|
    /// | `JWT_SECRET`      | `dev_secret_change_me` |
    /// | `JWT_EXPIRY_MINS` | `120`                  |
    ///
    /// # Panics
    ///
    /// Panics in production when the secret is empty or the insecure default,
    /// and whenever `JWT_EXPIRY_MINS` is not a positive integer.
    pub fn from_env(env: AppEnv) -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| INSECURE_DEFAULT_SECRET.into());

        if let Err(reason) = check_secret(&secret, env) {
            panic!("{reason}");
        }
        if secret == INSECURE_DEFAULT_SECRET {
            tracing::warn!("JWT_SECRET is not set; using the insecure development default");
        }

        let expiry_mins: i64 = std::env::var("JWT_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_EXPIRY_MINS must be a valid i64");
        assert!(expiry_mins > 0, "JWT_EXPIRY_MINS must be positive");

        Self {
            secret,
            expiry_mins,
        }
    }
}

/// Reject secrets that must never sign production tokens.
pub fn check_secret(secret: &str, env: AppEnv) -> Result<(), String> {
    if secret.is_empty() {
        return Err("JWT_SECRET must not be empty".into());
    }
    if env.is_production() && secret == INSECURE_DEFAULT_SECRET {
        return Err("JWT_SECRET must be set to a non-default value in production".into());
    }
    Ok(())
}

/// Generate a session token for the given user.
pub fn generate_token(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        user_id,
        username: username.to_string(),
        iat: now,
        exp: now + config.expiry_mins * 60,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Checks the signature and expiry with no leeway. A token is expired from
/// the second `exp` is reached.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, requires exp
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    // jsonwebtoken only rejects `exp < now`.
    if token_data.claims.exp <= chrono::Utc::now().timestamp() {
        return Err(ErrorKind::ExpiredSignature.into());
    }
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_mins: 120,
        }
    }

    fn sign(claims: &Claims, config: &JwtConfig) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = test_config();
        let token = generate_token(42, "alice", &config).expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, 120 * 60);
    }

    #[test]
    fn test_claims_use_user_id_key() {
        let claims = Claims {
            user_id: 1,
            username: "a".into(),
            iat: 0,
            exp: 1,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], 1);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let token = sign(
            &Claims {
                user_id: 1,
                username: "alice".into(),
                iat: now - 7200,
                exp: now - 1,
            },
            &config,
        );

        assert!(
            validate_token(&token, &config).is_err(),
            "expired token must fail validation without leeway"
        );
    }

    #[test]
    fn test_token_valid_just_before_expiry() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let token = sign(
            &Claims {
                user_id: 1,
                username: "alice".into(),
                iat: now - 7100,
                exp: now + 30,
            },
            &config,
        );

        assert!(validate_token(&token, &config).is_ok());
    }

    #[test]
    fn test_token_rejected_at_exact_expiry() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let token = sign(
            &Claims {
                user_id: 1,
                username: "alice".into(),
                iat: now - 7200,
                exp: now,
            },
            &config,
        );

        let err = validate_token(&token, &config).expect_err("token must expire at exp");
        assert_matches!(err.kind(), ErrorKind::ExpiredSignature);
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            expiry_mins: 120,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            expiry_mins: 120,
        };

        let token = generate_token(1, "alice", &config_a).expect("token generation should succeed");
        assert!(
            validate_token(&token, &config_b).is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn test_tampered_payload_fails() {
        let config = test_config();
        let token = generate_token(1, "alice", &config).unwrap();
        let forged = generate_token(2, "mallory", &config).unwrap();

        // Graft mallory's payload onto alice's signature.
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert!(validate_token(&spliced, &config).is_err());
    }

    #[test]
    fn test_garbage_token_fails() {
        assert!(validate_token("not.a.token", &test_config()).is_err());
    }

    #[test]
    fn test_secret_checks() {
        assert!(check_secret("", AppEnv::Development).is_err());
        assert!(check_secret(INSECURE_DEFAULT_SECRET, AppEnv::Development).is_ok());
        assert!(check_secret(INSECURE_DEFAULT_SECRET, AppEnv::Production).is_err());
        assert!(check_secret("a-real-secret", AppEnv::Production).is_ok());
    }
}
