//! Score service — score submission, recent scores and the leaderboard.

use peryashot_domain::error::PeryaShotError;
use peryashot_domain::id::UserId;
use peryashot_domain::score::{LeaderboardEntry, NewScore, Score};

use crate::ports::{ScoreRepository, UserRepository};

/// Number of scores returned by [`ScoreService::recent_scores`].
pub const RECENT_SCORES_LIMIT: usize = 10;

/// Number of entries returned by [`ScoreService::leaderboard`].
pub const LEADERBOARD_LIMIT: usize = 10;

/// Application service for scores.
pub struct ScoreService<S, U> {
    scores: S,
    users: U,
}

impl<S: ScoreRepository, U: UserRepository> ScoreService<S, U> {
    /// Create a new service backed by the given repositories.
    pub fn new(scores: S, users: U) -> Self {
        Self { scores, users }
    }

    /// Record a score, then raise the user's highest score if it was beaten.
    ///
    /// The highest-score update is best effort: the two writes are not
    /// atomic, and a failing update is logged without failing the call.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the score itself cannot be inserted.
    pub async fn submit_score(&self, submission: NewScore) -> Result<Score, PeryaShotError> {
        let score = self.scores.create(submission).await?;

        match self
            .users
            .raise_highest_score(submission.user_id, submission.score)
            .await
        {
            Ok(true) => {
                tracing::debug!(user_id = %submission.user_id, score = submission.score, "new highest score");
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(
                    user_id = %submission.user_id,
                    score_id = %score.id,
                    error = ?err,
                    "failed to update highest score, score was still saved"
                );
            }
        }

        Ok(score)
    }

    /// The last [`RECENT_SCORES_LIMIT`] scores of a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn recent_scores(&self, user_id: UserId) -> Result<Vec<Score>, PeryaShotError> {
        self.scores
            .find_recent_by_user(user_id, RECENT_SCORES_LIMIT)
            .await
    }

    /// The top [`LEADERBOARD_LIMIT`] scores across all users.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, PeryaShotError> {
        self.scores.leaderboard(LEADERBOARD_LIMIT).await
    }
}
