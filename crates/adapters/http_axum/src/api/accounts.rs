//! JSON handlers for registration and login.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use peryashot_app::ports::{PasswordHasher, ScoreRepository, UserRepository};
use peryashot_domain::id::UserId;
use peryashot_domain::user::{Credentials, Registration};

use super::MessageBody;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /register`.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

/// Request body for `POST /login`.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Response body for a successful login.
#[derive(Serialize)]
pub struct LoginBody {
    pub message: &'static str,
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

/// Possible responses from the register endpoint.
pub enum RegisterResponse {
    Ok(Json<MessageBody>),
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the login endpoint.
pub enum LoginResponse {
    Ok(Json<LoginBody>),
}

impl IntoResponse for LoginResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /register`
pub async fn register<U, S, H>(
    State(state): State<AppState<U, S, H>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<RegisterResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    S: ScoreRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| ApiError::rejected(&rejection))?;
    let registration = Registration::new(req.username, req.password, req.email)?;
    state.account_service.register(registration).await?;
    Ok(RegisterResponse::Ok(Json(MessageBody {
        message: "User registered successfully!",
    })))
}

/// `POST /login`
pub async fn login<U, S, H>(
    State(state): State<AppState<U, S, H>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<LoginResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    S: ScoreRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| ApiError::rejected(&rejection))?;
    let credentials = Credentials::new(req.username, req.password)?;
    let user = state.account_service.login(credentials).await?;
    Ok(LoginResponse::Ok(Json(LoginBody {
        message: "Login successful!",
        user_id: user.id,
    })))
}
