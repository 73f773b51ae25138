//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health           - Liveness check
//! GET    /health/ready     - Readiness check (pings the database)
//!
//! # Users
//! POST   /user/signup      - Register, returns the user and a token
//! POST   /user/login       - Authenticate, returns the user and a token
//!
//! # Cart
//! GET    /cart/:id         - List a user's cart entries (any authenticated)
//! POST   /cart             - Reserve one unit of a product (primary role `user`)
//! DELETE /cart/:id         - Release a reservation (primary role `user`)
//!
//! # Categories
//! GET    /categories       - List categories
//! POST   /categories       - Create a category
//! PUT    /categories/:id   - Rename a category
//! DELETE /categories/:id   - Delete an unused category (primary role `admin`)
//!
//! # Products
//! POST   /products         - Create a product
//! PUT    /products/:id     - Update a product (primary role `manufacturer`)
//! ```
//!
//! Success bodies are wrapped in the `{"status":"success","data":...}`
//! envelope; error bodies come from [`crate::error::ApiError`].

pub mod cart;
pub mod categories;
pub mod products;
pub mod users;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the application router with all routes and middleware.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/user", users::routes())
        .nest("/cart", cart::routes())
        .nest("/categories", categories::routes())
        .nest("/products", products::routes())
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe; answers without touching any dependency.
async fn health() -> &'static str {
    "ok"
}

/// Readiness probe; verifies the database pool can serve a query.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(state.pool())
        .await
    {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Unmatched routes render the standard error envelope.
async fn fallback() -> ApiError {
    ApiError::NotFound("not found".to_owned())
}
