//! Storage port — repository traits for persistence.

use std::future::Future;
use std::sync::Arc;

use peryashot_domain::error::PeryaShotError;
use peryashot_domain::id::UserId;
use peryashot_domain::score::{LeaderboardEntry, NewScore, Score};
use peryashot_domain::user::{NewUser, ProfileUpdate, User};

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    /// Insert a new user and return it with its storage-generated id.
    fn create(&self, user: NewUser) -> impl Future<Output = Result<User, PeryaShotError>> + Send;

    /// Get a user by its unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, PeryaShotError>> + Send;

    /// Get a user by its unique username.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, PeryaShotError>> + Send;

    /// Get all users, unpaginated.
    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, PeryaShotError>> + Send;

    /// Overwrite the editable profile fields of a user.
    fn update(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> impl Future<Output = Result<(), PeryaShotError>> + Send;

    /// Delete a user by its unique identifier.
    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), PeryaShotError>> + Send;

    /// Set `highest_score` to `score` only when it is strictly higher than the
    /// stored value. Returns whether a row changed.
    fn raise_highest_score(
        &self,
        id: UserId,
        score: i64,
    ) -> impl Future<Output = Result<bool, PeryaShotError>> + Send;
}

impl<T: UserRepository + Send + Sync> UserRepository for Arc<T> {
    fn create(&self, user: NewUser) -> impl Future<Output = Result<User, PeryaShotError>> + Send {
        (**self).create(user)
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, PeryaShotError>> + Send {
        (**self).get_by_id(id)
    }

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, PeryaShotError>> + Send {
        (**self).find_by_username(username)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, PeryaShotError>> + Send {
        (**self).get_all()
    }

    fn update(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> impl Future<Output = Result<(), PeryaShotError>> + Send {
        (**self).update(id, update)
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), PeryaShotError>> + Send {
        (**self).delete(id)
    }

    fn raise_highest_score(
        &self,
        id: UserId,
        score: i64,
    ) -> impl Future<Output = Result<bool, PeryaShotError>> + Send {
        (**self).raise_highest_score(id, score)
    }
}

/// Repository for appending and querying [`Score`]s.
pub trait ScoreRepository {
    /// Insert a score and return it with its storage-generated id.
    fn create(&self, score: NewScore)
    -> impl Future<Output = Result<Score, PeryaShotError>> + Send;

    /// Get the most recent scores of a user, newest first.
    fn find_recent_by_user(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Score>, PeryaShotError>> + Send;

    /// Get the highest scores across all users, joined with their usernames.
    fn leaderboard(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<LeaderboardEntry>, PeryaShotError>> + Send;
}
