//! Request-level middleware for the API.
//!
//! The authorization gate lives here as axum extractors; routes opt in per
//! handler rather than per layer, so public routes carry no auth cost.

pub mod auth;

pub use auth::{RequireAdmin, RequireAuth, RequireManufacturer, RequireUser};
