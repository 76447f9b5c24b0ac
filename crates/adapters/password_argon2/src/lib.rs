//! # peryashot-adapter-password-argon2
//!
//! Implements the `PasswordHasher` port with Argon2id.
//!
//! Hashes are stored in PHC string format (`$argon2id$v=19$m=…,t=…,p=…$salt$hash`),
//! so the salt and cost travel with each hash and verification never needs
//! the hasher's own parameters.
//!
//! Both operations run on tokio's blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use peryashot_app::ports::PasswordHasher;
use peryashot_domain::error::PeryaShotError;

/// Errors raised while hashing or verifying.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// The cost parameters are out of range.
    #[error("invalid argon2 parameters")]
    Params(#[from] argon2::Error),

    /// Hashing failed, or a stored hash could not be parsed.
    #[error("password hash error")]
    Hash(#[from] argon2::password_hash::Error),

    /// The blocking task panicked or was cancelled.
    #[error("password hashing task failed")]
    Join(#[from] tokio::task::JoinError),
}

impl From<HashError> for PeryaShotError {
    fn from(err: HashError) -> Self {
        Self::Hashing(Box::new(err))
    }
}

/// Argon2id hasher with a fixed cost.
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Default for Argon2Hasher {
    /// 19 MiB of memory, 2 iterations, 1 lane.
    fn default() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT),
        }
    }
}

impl Argon2Hasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom cost, e.g. a cheap one in tests.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Params`] if a value is outside the range argon2 accepts.
    pub fn with_cost(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, HashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    fn hash_blocking(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    fn verify_blocking(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(hash)?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, password: &str) -> Result<String, PeryaShotError> {
        let hasher = self.clone();
        let password = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || hasher.hash_blocking(&password))
            .await
            .map_err(HashError::from)??;
        Ok(hash)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PeryaShotError> {
        let hasher = self.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || hasher.verify_blocking(&password, &hash))
            .await
            .map_err(HashError::from)??;
        Ok(matches)
    }
}
