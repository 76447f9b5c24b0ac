//! # peryashot-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `peryashot-app::ports::storage`
//! - Own the connection handle (one connection by default)
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `peryashot-app` (for port traits) and `peryashot-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod pool;
mod score_repo;
mod user_repo;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use score_repo::SqliteScoreRepository;
pub use user_repo::SqliteUserRepository;
