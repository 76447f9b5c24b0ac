//! # peryashot-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `UserRepository` — user rows and the denormalized highest score
//!   - `ScoreRepository` — append scores, recent scores, leaderboard
//!   - `PasswordHasher` — one-way salted password hashing
//! - Define **driving/inbound ports** as use-case structs:
//!   - `AccountService` — register, login, profile CRUD
//!   - `ScoreService` — submit scores, recent scores, leaderboard
//!
//! ## Dependency rule
//! Depends on `peryashot-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
