//! Score — the result of one finished game, and the leaderboard built from them.

use serde::Serialize;

use crate::error::ValidationError;
use crate::id::{ScoreId, UserId};
use crate::time::Timestamp;

/// A stored score row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub id: ScoreId,
    pub user_id: UserId,
    pub score: i64,
    pub created_at: Timestamp,
}

/// A validated score submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewScore {
    pub user_id: UserId,
    pub score: i64,
}

impl NewScore {
    /// Build a submission from the raw request fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when `userId` or `score` is
    /// absent, and [`ValidationError::InvalidId`] when `userId` is not a
    /// positive integer.
    pub fn new(user_id: Option<i64>, score: Option<i64>) -> Result<Self, ValidationError> {
        let user_id = user_id.ok_or(ValidationError::MissingField("userId"))?;
        let score = score.ok_or(ValidationError::MissingField("score"))?;
        Ok(Self {
            user_id: UserId::try_from(user_id)?,
            score,
        })
    }
}

/// One line of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: i64,
}
