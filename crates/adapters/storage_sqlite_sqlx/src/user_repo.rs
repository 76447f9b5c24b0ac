//! `SQLite` implementation of [`UserRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use peryashot_app::ports::UserRepository;
use peryashot_domain::error::PeryaShotError;
use peryashot_domain::id::UserId;
use peryashot_domain::user::{NewUser, ProfileUpdate, User};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(User);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<User> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(User {
            id: UserId::from_raw(row.try_get("user_id")?),
            username: row.try_get("username")?,
            password_hash: row.try_get("password")?,
            email: row.try_get("email")?,
            highest_score: row.try_get("highest_score")?,
            profile_pic_url: row.try_get("profile_pic_url")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO users (username, password, email) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE user_id = ?";
const SELECT_BY_USERNAME: &str = "SELECT * FROM users WHERE username = ?";
const SELECT_ALL: &str = "SELECT * FROM users ORDER BY user_id";
const UPDATE: &str =
    "UPDATE users SET username = ?, email = ?, profile_pic_url = ? WHERE user_id = ?";
const DELETE_BY_ID: &str = "DELETE FROM users WHERE user_id = ?";
const RAISE_HIGHEST_SCORE: &str =
    "UPDATE users SET highest_score = ? WHERE user_id = ? AND highest_score < ?";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection handle.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, PeryaShotError> {
        let result = sqlx::query(INSERT)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(&user.email)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(User {
            id: UserId::from_raw(result.last_insert_rowid()),
            username: user.username,
            password_hash: user.password_hash,
            email: Some(user.email),
            highest_score: 0,
            profile_pic_url: None,
        })
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, PeryaShotError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, PeryaShotError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_USERNAME)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<User>, PeryaShotError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, id: UserId, update: ProfileUpdate) -> Result<(), PeryaShotError> {
        sqlx::query(UPDATE)
            .bind(update.username)
            .bind(update.email)
            .bind(update.profile_pic_url)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), PeryaShotError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn raise_highest_score(&self, id: UserId, score: i64) -> Result<bool, PeryaShotError> {
        let result = sqlx::query(RAISE_HIGHEST_SCORE)
            .bind(score)
            .bind(id.as_i64())
            .bind(score)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
