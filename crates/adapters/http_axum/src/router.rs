//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use peryashot_app::ports::{PasswordHasher, ScoreRepository, UserRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the API routes at the root, accepts cross-origin requests from any
/// origin, and includes a [`TraceLayer`] that logs each HTTP request/response
/// at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<U, S, H>(state: AppState<U, S, H>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: ScoreRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
