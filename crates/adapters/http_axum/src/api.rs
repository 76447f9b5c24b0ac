//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod accounts;
#[allow(clippy::missing_errors_doc)]
pub mod scores;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use std::str::FromStr;

use axum::Router;
use axum::routing::{get, post};
use serde::Serialize;

use peryashot_app::ports::{PasswordHasher, ScoreRepository, UserRepository};
use peryashot_domain::error::ValidationError;
use peryashot_domain::id::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// `{ "message": … }` confirmation body.
#[derive(Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Build the API router.
pub fn routes<U, S, H>() -> Router<AppState<U, S, H>>
where
    U: UserRepository + Send + Sync + 'static,
    S: ScoreRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    Router::new()
        // Accounts
        .route("/register", post(accounts::register::<U, S, H>))
        .route("/login", post(accounts::login::<U, S, H>))
        // Scores
        .route("/scores", post(scores::submit::<U, S, H>))
        .route("/scores/leaderboard", get(scores::leaderboard::<U, S, H>))
        .route("/scores/{id}", get(scores::recent::<U, S, H>))
        // Users
        .route("/users", get(users::list::<U, S, H>))
        .route(
            "/users/{id}",
            get(users::get::<U, S, H>)
                .put(users::update::<U, S, H>)
                .delete(users::delete::<U, S, H>),
        )
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::from_str(raw).map_err(|err| ApiError::from(ValidationError::from(err)))
}
