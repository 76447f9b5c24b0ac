//! Shared application state for axum handlers.

use std::sync::Arc;

use peryashot_app::ports::{PasswordHasher, ScoreRepository, UserRepository};
use peryashot_app::services::account_service::AccountService;
use peryashot_app::services::score_service::ScoreService;

/// Application state shared across all axum handlers.
///
/// Generic over the user repository, score repository and password hasher
/// to avoid dynamic dispatch. The user repository is shared by both services
/// through an `Arc`. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<U, S, H> {
    /// Registration, login and profile service.
    pub account_service: Arc<AccountService<Arc<U>, H>>,
    /// Score submission and leaderboard service.
    pub score_service: Arc<ScoreService<S, Arc<U>>>,
}

impl<U, S, H> Clone for AppState<U, S, H> {
    fn clone(&self) -> Self {
        Self {
            account_service: Arc::clone(&self.account_service),
            score_service: Arc::clone(&self.score_service),
        }
    }
}

impl<U, S, H> AppState<U, S, H>
where
    U: UserRepository + Send + Sync + 'static,
    S: ScoreRepository + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    /// Wire both services around the injected storage and hasher.
    pub fn new(user_repo: U, score_repo: S, hasher: H) -> Self {
        let user_repo = Arc::new(user_repo);
        Self {
            account_service: Arc::new(AccountService::new(Arc::clone(&user_repo), hasher)),
            score_service: Arc::new(ScoreService::new(score_repo, user_repo)),
        }
    }
}
