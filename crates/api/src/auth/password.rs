//! Argon2id password hashing and verification.
//!
//! Hashes use the PHC string format, so the salt and cost parameters travel
//! with the hash and verification never needs the current configuration.
//! No strength rules are enforced on new passwords.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Tunable Argon2id cost used for new hashes.
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    params: Params,
}

impl PasswordConfig {
    /// Build a config from explicit costs.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, argon2::Error> {
        let params = Params::new(memory_kib, iterations, parallelism, None)?;
        Ok(Self { params })
    }

    /// Load hashing cost from environment variables.
    ///
    /// | Env Var                     | Default |
    /// |-----------------------------|---------|
    /// | `PASSWORD_HASH_MEMORY_KIB`  | `19456` |
    /// | `PASSWORD_HASH_ITERATIONS`  | `2`     |
    /// | `PASSWORD_HASH_PARALLELISM` | `1`     |
    ///
    /// # Panics
    ///
    /// Panics if a value does not parse or Argon2 rejects the combination.
    pub fn from_env() -> Self {
        let read = |name: &str, default: u32| -> u32 {
            std::env::var(name)
                .map(|v| {
                    v.parse()
                        .unwrap_or_else(|_| panic!("{name} must be a valid u32"))
                })
                .unwrap_or(default)
        };

        Self::new(
            read("PASSWORD_HASH_MEMORY_KIB", Params::DEFAULT_M_COST),
            read("PASSWORD_HASH_ITERATIONS", Params::DEFAULT_T_COST),
            read("PASSWORD_HASH_PARALLELISM", Params::DEFAULT_P_COST),
        )
        .unwrap_or_else(|e| panic!("Invalid password hashing parameters: {e}"))
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string.
pub fn hash_password(
    password: &str,
    config: &PasswordConfig,
) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = config.hasher().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}
