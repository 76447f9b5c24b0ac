//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`PeryaShotError`] via `#[from]` or an explicit `From` impl.

use crate::id::ParseIdError;

/// Boxed error coming from an infrastructure layer (database, hasher).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum PeryaShotError {
    /// The caller sent an incomplete or malformed request.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Credentials were rejected.
    #[error("unauthorized")]
    Unauthorized(#[from] CredentialError),

    /// A storage operation failed.
    #[error("storage error")]
    Storage(#[source] BoxError),

    /// Hashing or verifying a password failed.
    #[error("password hashing error")]
    Hashing(#[source] BoxError),
}

/// Client input errors.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing {0}")]
    MissingField(&'static str),

    #[error("invalid identifier")]
    InvalidId(#[from] ParseIdError),

    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

/// A lookup found no matching record.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found.")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Authentication failures.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Invalid password.")]
    InvalidPassword,
}
