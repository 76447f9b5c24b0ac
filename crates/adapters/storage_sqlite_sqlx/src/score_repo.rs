//! `SQLite` implementation of [`ScoreRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use peryashot_app::ports::ScoreRepository;
use peryashot_domain::error::PeryaShotError;
use peryashot_domain::id::{ScoreId, UserId};
use peryashot_domain::score::{LeaderboardEntry, NewScore, Score};
use peryashot_domain::time::now;

use crate::error::StorageError;

struct Wrapper(Score);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let created_at: String = row.try_get("created_at")?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(Score {
            id: ScoreId::from_raw(row.try_get("score_id")?),
            user_id: UserId::from_raw(row.try_get("user_id")?),
            score: row.try_get("score")?,
            created_at,
        }))
    }
}

struct EntryWrapper(LeaderboardEntry);

impl<'r> FromRow<'r, SqliteRow> for EntryWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(LeaderboardEntry {
            username: row.try_get("username")?,
            score: row.try_get("score")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO scores (user_id, score, created_at) VALUES (?, ?, ?)";
// AUTOINCREMENT keeps score_id monotonic, so it doubles as insertion order.
const SELECT_RECENT_BY_USER: &str =
    "SELECT * FROM scores WHERE user_id = ? ORDER BY score_id DESC LIMIT ?";
const SELECT_LEADERBOARD: &str = r"
    SELECT u.username, s.score
    FROM scores s
    JOIN users u ON s.user_id = u.user_id
    ORDER BY s.score DESC
    LIMIT ?
";

/// `SQLite`-backed score repository.
pub struct SqliteScoreRepository {
    pool: SqlitePool,
}

impl SqliteScoreRepository {
    /// Create a new repository using the given connection handle.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ScoreRepository for SqliteScoreRepository {
    async fn create(&self, score: NewScore) -> Result<Score, PeryaShotError> {
        let created_at = now();
        let result = sqlx::query(INSERT)
            .bind(score.user_id.as_i64())
            .bind(score.score)
            .bind(created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Score {
            id: ScoreId::from_raw(result.last_insert_rowid()),
            user_id: score.user_id,
            score: score.score,
            created_at,
        })
    }

    async fn find_recent_by_user(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<Score>, PeryaShotError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT_BY_USER)
            .bind(user_id.as_i64())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, PeryaShotError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<EntryWrapper> = sqlx::query_as(SELECT_LEADERBOARD)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::memory_database;
    use crate::user_repo::SqliteUserRepository;
    use peryashot_app::ports::UserRepository;
    use peryashot_domain::user::NewUser;

    async fn setup() -> (SqliteScoreRepository, SqliteUserRepository) {
        let db = memory_database().await;
        (
            SqliteScoreRepository::new(db.pool().clone()),
            SqliteUserRepository::new(db.pool().clone()),
        )
    }

    async fn player(users: &SqliteUserRepository, username: &str) -> UserId {
        users
            .create(NewUser {
                username: username.to_string(),
                password_hash: "hash".to_string(),
                email: format!("{username}@x.com"),
            })
            .await
            .unwrap()
            .id
    }

    fn submission(user_id: UserId, score: i64) -> NewScore {
        NewScore { user_id, score }
    }

    #[tokio::test]
    async fn should_assign_increasing_ids() {
        let (scores, users) = setup().await;
        let ana = player(&users, "ana").await;

        let first = scores.create(submission(ana, 10)).await.unwrap();
        let second = scores.create(submission(ana, 5)).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn should_reject_score_for_unknown_user() {
        let (scores, _users) = setup().await;
        let result = scores.create(submission(UserId::from_raw(42), 10)).await;
        assert!(matches!(result, Err(PeryaShotError::Storage(_))));
    }

    #[tokio::test]
    async fn should_return_ten_most_recent_scores_newest_first() {
        let (scores, users) = setup().await;
        let ana = player(&users, "ana").await;
        let ben = player(&users, "ben").await;
        for value in 1..=12 {
            scores.create(submission(ana, value)).await.unwrap();
        }
        scores.create(submission(ben, 500)).await.unwrap();

        let recent = scores.find_recent_by_user(ana, 10).await.unwrap();
        let values: Vec<i64> = recent.iter().map(|s| s.score).collect();
        assert_eq!(values, vec![12, 11, 10, 9, 8, 7, 6, 5, 4, 3]);
        assert!(recent.iter().all(|s| s.user_id == ana));
    }

    #[tokio::test]
    async fn should_return_empty_recent_scores_for_new_user() {
        let (scores, users) = setup().await;
        let ana = player(&users, "ana").await;
        assert!(scores.find_recent_by_user(ana, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_build_leaderboard_with_usernames() {
        let (scores, users) = setup().await;
        let ana = player(&users, "ana").await;
        let ben = player(&users, "ben").await;
        for (user, value) in [(ana, 30), (ben, 90), (ana, 70), (ben, 10)] {
            scores.create(submission(user, value)).await.unwrap();
        }

        let board = scores.leaderboard(3).await.unwrap();
        assert_eq!(
            board,
            vec![
                LeaderboardEntry {
                    username: "ben".to_string(),
                    score: 90
                },
                LeaderboardEntry {
                    username: "ana".to_string(),
                    score: 70
                },
                LeaderboardEntry {
                    username: "ana".to_string(),
                    score: 30
                },
            ]
        );
    }
}
