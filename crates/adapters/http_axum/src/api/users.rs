//! JSON handlers for user profiles.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use peryashot_app::ports::{PasswordHasher, ScoreRepository, UserRepository};
use peryashot_domain::user::{ProfileUpdate, UserProfile, UserSummary};

use super::{MessageBody, parse_user_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `PUT /users/:id`. Absent fields are written as null.
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub profile_pic_url: Option<String>,
}

#[derive(Serialize)]
pub struct UserBody {
    pub success: bool,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct UsersBody {
    pub success: bool,
    pub users: Vec<UserSummary>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<UsersBody>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<UserBody>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the update and delete endpoints.
pub enum ConfirmResponse {
    Ok(Json<MessageBody>),
}

impl IntoResponse for ConfirmResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /users`
pub async fn list<U, S, H>(
    State(state): State<AppState<U, S, H>>,
) -> Result<ListResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    S: ScoreRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let users = state.account_service.list_users().await?;
    Ok(ListResponse::Ok(Json(UsersBody {
        success: true,
        users,
    })))
}

/// `GET /users/:id`
pub async fn get<U, S, H>(
    State(state): State<AppState<U, S, H>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    S: ScoreRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let user = state.account_service.get_profile(user_id).await?;
    Ok(GetResponse::Ok(Json(UserBody {
        success: true,
        user,
    })))
}

/// `PUT /users/:id`
pub async fn update<U, S, H>(
    State(state): State<AppState<U, S, H>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ConfirmResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    S: ScoreRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let Json(req) = payload.map_err(|rejection| ApiError::rejected(&rejection))?;
    state
        .account_service
        .update_user(
            user_id,
            ProfileUpdate {
                username: req.username,
                email: req.email,
                profile_pic_url: req.profile_pic_url,
            },
        )
        .await?;
    Ok(ConfirmResponse::Ok(Json(MessageBody {
        message: "User updated successfully!",
    })))
}

/// `DELETE /users/:id`
pub async fn delete<U, S, H>(
    State(state): State<AppState<U, S, H>>,
    Path(id): Path<String>,
) -> Result<ConfirmResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    S: ScoreRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    state.account_service.delete_user(user_id).await?;
    Ok(ConfirmResponse::Ok(Json(MessageBody {
        message: "User deleted successfully!",
    })))
}
