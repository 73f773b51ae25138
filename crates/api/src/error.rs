//! Unified error handling.
//!
//! Provides a unified `ApiError` type that renders domain failures with their
//! explicit status and message, and collapses everything unexpected into a
//! generic 500 (full detail is logged server-side only). All route handlers
//! return `Result<T, ApiError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;

/// Fixed body for internal failures; never leaks store errors or backtraces.
const INTERNAL_MESSAGE: &str = "Something went very wrong!";

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict with existing state (duplicate email, category in use).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Referenced entity missing or input semantically unusable.
    #[error("Unprocessable: {0}")]
    UnprocessableEntity(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Internal failures carry no detail to the caller
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = self.status();

        let message = match &self {
            Self::Database(_) | Self::Internal(_) => INTERNAL_MESSAGE.to_string(),
            Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::UnprocessableEntity(msg)
            | Self::BadRequest(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg) => msg.clone(),
        };

        // `fail` for client errors, `error` for server errors
        let kind = if status.is_server_error() {
            "error"
        } else {
            "fail"
        };

        let body = Json(json!({
            "status": kind,
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized("Invalid credentials".to_owned()),
            AuthError::EmailTaken => Self::Conflict("Email already exists".to_owned()),
            AuthError::InvalidEmail(_) => Self::BadRequest("Invalid email address".to_owned()),
            AuthError::WeakPassword(msg) => Self::BadRequest(msg),
            AuthError::PasswordHash => Self::Internal("password hashing failed".to_owned()),
            AuthError::Token(e) => Self::Internal(format!("token signing failed: {e}")),
            AuthError::Repository(e) => Self::Database(e),
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ProductNotFound => {
                Self::UnprocessableEntity("product not found".to_owned())
            }
            CartError::AlreadyInCart => {
                Self::BadRequest("Product already exists in the cart.".to_owned())
            }
            CartError::OutOfStock => {
                Self::BadRequest("Not enough quantity available in stock.".to_owned())
            }
            CartError::ItemNotFound => Self::NotFound("Cart item not found".to_owned()),
            CartError::Repository(e) => Self::Database(e),
        }
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
