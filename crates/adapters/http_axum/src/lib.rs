//! # peryashot-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the game's **JSON API** (`/register`, `/login`, `/scores`, `/users`, …)
//! - Validate request bodies against explicit request schemas
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses
//! - Allow cross-origin requests from any origin
//!
//! ## Dependency rule
//! Depends on `peryashot-app` (for port traits and services) and
//! `peryashot-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
