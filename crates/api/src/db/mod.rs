//! Database access for the Loommarket `PostgreSQL` store.
//!
//! # Tables
//!
//! - `users` - Account identity, password hash, and role tags
//! - `categories` - Product categories (unique name)
//! - `products` - Catalog entries with `stock_quantity`
//! - `cart` - One row per (user, product) reservation
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and are embedded via
//! `sqlx::migrate!`; the binary runs them on startup.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod categories;
pub mod products;
pub mod users;

pub use categories::CategoryRepository;
pub use products::{ProductInput, ProductRepository};
pub use users::UserRepository;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
