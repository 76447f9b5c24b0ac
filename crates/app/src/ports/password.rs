//! Password hashing port.
//!
//! Implementations must keep the hashing work off the async worker threads.

use std::future::Future;

use peryashot_domain::error::PeryaShotError;

/// One-way salted password hashing with a fixed cost.
pub trait PasswordHasher {
    /// Hash `password` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`PeryaShotError::Hashing`] if the hasher fails.
    fn hash(&self, password: &str) -> impl Future<Output = Result<String, PeryaShotError>> + Send;

    /// Check `password` against a hash produced by [`PasswordHasher::hash`].
    ///
    /// Returns `Ok(false)` on a mismatch; errors are reserved for hashes that
    /// cannot be read at all.
    ///
    /// # Errors
    ///
    /// Returns [`PeryaShotError::Hashing`] if `hash` is not a valid encoded hash.
    fn verify(
        &self,
        password: &str,
        hash: &str,
    ) -> impl Future<Output = Result<bool, PeryaShotError>> + Send;
}
