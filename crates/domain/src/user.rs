//! User — a registered player.

use serde::Serialize;

use crate::error::ValidationError;
use crate::id::UserId;

/// A stored player, including the password hash.
///
/// Never serialized directly; use [`UserProfile`] or [`UserSummary`] for
/// anything leaving the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub highest_score: i64,
    pub profile_pic_url: Option<String>,
}

impl User {
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            highest_score: self.highest_score,
            profile_pic_url: self.profile_pic_url.clone(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            user_id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Public fields returned by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub highest_score: i64,
    pub profile_pic_url: Option<String>,
}

/// Public fields returned by the user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub user_id: UserId,
    pub username: String,
    pub email: Option<String>,
}

/// A validated sign-up request. The password is still plaintext here.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl Registration {
    /// Check that every field is present. Empty strings are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming the first absent field.
    pub fn new(
        username: Option<String>,
        password: Option<String>,
        email: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: required("username", username)?,
            password: required("password", password)?,
            email: required("email", email)?,
        })
    }
}

/// A user row about to be inserted; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
}

/// A validated login request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `username` or `password` is missing.
    pub fn new(username: Option<String>, password: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            username: required("username", username)?,
            password: required("password", password)?,
        })
    }
}

/// Full overwrite of the editable profile fields.
///
/// There is no partial-update semantics: `None` is written as `NULL`.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub profile_pic_url: Option<String>,
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}
