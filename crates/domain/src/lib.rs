//! # peryashot-domain
//!
//! Pure domain model for the Perya Shot game backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Users** (players with credentials and a denormalized highest score)
//! - Define **Scores** (one row per finished game) and **Leaderboard** entries
//! - Validate incoming requests (required fields) before they reach a use-case
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod score;
pub mod user;
