//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use peryashot_domain::error::{PeryaShotError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

/// Maps [`PeryaShotError`] to an HTTP response with appropriate status code.
///
/// Internal failures are logged in full and reported to the client with a
/// generic message only.
#[derive(Debug)]
pub struct ApiError(PeryaShotError);

impl From<PeryaShotError> for ApiError {
    fn from(err: PeryaShotError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    /// Turn an axum body rejection into a validation error.
    pub fn rejected(rejection: &JsonRejection) -> Self {
        Self(ValidationError::MalformedBody(rejection.body_text()).into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            PeryaShotError::Validation(err) => {
                (StatusCode::BAD_REQUEST, "invalid_request", err.to_string())
            }
            PeryaShotError::NotFound(err) => (StatusCode::NOT_FOUND, "not_found", err.to_string()),
            PeryaShotError::Unauthorized(err) => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", err.to_string())
            }
            PeryaShotError::Storage(_) | PeryaShotError::Hashing(_) => {
                tracing::error!(error = ?self.0, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                code,
            }),
        )
            .into_response()
    }
}
