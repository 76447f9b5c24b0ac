//! JSON handlers for scores and the leaderboard.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use peryashot_app::ports::{PasswordHasher, ScoreRepository, UserRepository};
use peryashot_domain::id::ScoreId;
use peryashot_domain::score::{LeaderboardEntry, NewScore};

use super::parse_user_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /scores`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    pub user_id: Option<i64>,
    pub score: Option<i64>,
}

/// Response body for a recorded score.
#[derive(Serialize)]
pub struct SubmitScoreBody {
    pub success: bool,
    #[serde(rename = "scoreId")]
    pub score_id: ScoreId,
}

/// One item of a user's recent scores.
#[derive(Serialize)]
pub struct ScoreItem {
    pub score: i64,
}

#[derive(Serialize)]
pub struct RecentScoresBody {
    pub success: bool,
    pub scores: Vec<ScoreItem>,
}

#[derive(Serialize)]
pub struct LeaderboardBody {
    pub success: bool,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Possible responses from the submit endpoint.
pub enum SubmitResponse {
    Ok(Json<SubmitScoreBody>),
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the recent-scores endpoint.
pub enum RecentResponse {
    Ok(Json<RecentScoresBody>),
}

impl IntoResponse for RecentResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the leaderboard endpoint.
pub enum LeaderboardResponse {
    Ok(Json<LeaderboardBody>),
}

impl IntoResponse for LeaderboardResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /scores`
pub async fn submit<U, S, H>(
    State(state): State<AppState<U, S, H>>,
    payload: Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> Result<SubmitResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    S: ScoreRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| ApiError::rejected(&rejection))?;
    let submission = NewScore::new(req.user_id, req.score)?;
    let score = state.score_service.submit_score(submission).await?;
    Ok(SubmitResponse::Ok(Json(SubmitScoreBody {
        success: true,
        score_id: score.id,
    })))
}

/// `GET /scores/:id`
pub async fn recent<U, S, H>(
    State(state): State<AppState<U, S, H>>,
    Path(id): Path<String>,
) -> Result<RecentResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    S: ScoreRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let scores = state.score_service.recent_scores(user_id).await?;
    Ok(RecentResponse::Ok(Json(RecentScoresBody {
        success: true,
        scores: scores
            .into_iter()
            .map(|s| ScoreItem { score: s.score })
            .collect(),
    })))
}

/// `GET /scores/leaderboard`
pub async fn leaderboard<U, S, H>(
    State(state): State<AppState<U, S, H>>,
) -> Result<LeaderboardResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    S: ScoreRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let leaderboard = state.score_service.leaderboard().await?;
    Ok(LeaderboardResponse::Ok(Json(LeaderboardBody {
        success: true,
        leaderboard,
    })))
}
