//! Account service — registration, login and profile management.

use peryashot_domain::error::{CredentialError, NotFoundError, PeryaShotError};
use peryashot_domain::id::UserId;
use peryashot_domain::user::{
    Credentials, NewUser, ProfileUpdate, Registration, User, UserProfile, UserSummary,
};

use crate::ports::{PasswordHasher, UserRepository};

/// Application service for user accounts.
pub struct AccountService<U, H> {
    users: U,
    hasher: H,
}

impl<U: UserRepository, H: PasswordHasher> AccountService<U, H> {
    /// Create a new service backed by the given repository and hasher.
    pub fn new(users: U, hasher: H) -> Self {
        Self { users, hasher }
    }

    /// Hash the password and store a new user.
    ///
    /// # Errors
    ///
    /// Returns [`PeryaShotError::Hashing`] if hashing fails, or a storage
    /// error (including a duplicate username) from the repository.
    pub async fn register(&self, registration: Registration) -> Result<User, PeryaShotError> {
        let password_hash = self.hasher.hash(&registration.password).await?;
        let user = self
            .users
            .create(NewUser {
                username: registration.username,
                password_hash,
                email: registration.email,
            })
            .await?;
        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Check credentials and return the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`PeryaShotError::NotFound`] for an unknown username,
    /// [`PeryaShotError::Unauthorized`] for a wrong password, or a storage
    /// error from the repository.
    pub async fn login(&self, credentials: Credentials) -> Result<User, PeryaShotError> {
        let user = self
            .users
            .find_by_username(&credentials.username)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "User",
                id: credentials.username.clone(),
            })?;

        if !self
            .hasher
            .verify(&credentials.password, &user.password_hash)
            .await?
        {
            tracing::debug!(user_id = %user.id, "rejected login with wrong password");
            return Err(CredentialError::InvalidPassword.into());
        }
        Ok(user)
    }

    /// Look up the public profile of a user.
    ///
    /// # Errors
    ///
    /// Returns [`PeryaShotError::NotFound`] when no user with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_profile(&self, id: UserId) -> Result<UserProfile, PeryaShotError> {
        let user = self.users.get_by_id(id).await?.ok_or_else(|| NotFoundError {
            entity: "User",
            id: id.to_string(),
        })?;
        Ok(user.profile())
    }

    /// List every user.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, PeryaShotError> {
        let users = self.users.get_all().await?;
        Ok(users.iter().map(User::summary).collect())
    }

    /// Overwrite username, email and profile picture. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn update_user(&self, id: UserId, update: ProfileUpdate) -> Result<(), PeryaShotError> {
        self.users.update(id, update).await
    }

    /// Delete a user. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn delete_user(&self, id: UserId) -> Result<(), PeryaShotError> {
        self.users.delete(id).await
    }
}
