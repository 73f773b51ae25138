//! The authorization gate.
//!
//! Two-stage, composable per route:
//!
//! 1. [`RequireAuth`] authenticates: extracts the bearer token, verifies
//!    signature and expiry, then re-resolves the subject against the live
//!    `users` row. The re-check is what invalidates tokens for deleted
//!    accounts without a revocation list.
//! 2. [`RequireUser`] / [`RequireAdmin`] / [`RequireManufacturer`]
//!    authorize: they check the user's **primary (first) role only**
//!    against the allowed set. Full role-set intersection is deliberately
//!    not performed - see DESIGN.md.
//!
//! No state is retained between requests; every request re-runs the chain.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use loommarket_core::Role;

use crate::db::users::UserRepository;
use crate::error::ApiError;
use crate::models::User;
use crate::state::AppState;

const NOT_LOGGED_IN: &str = "You are not logged in! Please login to get access";
const INVALID_TOKEN: &str = "Invalid token";
const FORBIDDEN: &str = "You do not have permission to perform this action";

/// Extractor that requires a valid bearer token backed by a live account.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub User);

/// Extractor that additionally requires the primary role to be `user`.
pub struct RequireUser(pub User);

/// Extractor that additionally requires the primary role to be `admin`.
pub struct RequireAdmin(pub User);

/// Extractor that additionally requires the primary role to be `manufacturer`.
pub struct RequireManufacturer(pub User);

/// Pull the bearer token out of an `Authorization` header value.
fn bearer_token(value: Option<&str>) -> Option<&str> {
    value?.strip_prefix("Bearer ")
}

/// Check the primary (first) role against an allowed set.
fn check_primary_role(user: &User, allowed: &[Role]) -> Result<(), ApiError> {
    let primary = user
        .primary_role()
        .ok_or_else(|| ApiError::Forbidden(FORBIDDEN.to_owned()))?;

    if allowed.contains(&primary) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(FORBIDDEN.to_owned()))
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = bearer_token(header)
            .ok_or_else(|| ApiError::Unauthorized(NOT_LOGGED_IN.to_owned()))?;

        let claims = state
            .tokens()
            .verify(token)
            .map_err(|_| ApiError::Unauthorized(INVALID_TOKEN.to_owned()))?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::Unauthorized(INVALID_TOKEN.to_owned()))?;

        // Re-resolve the subject against the live account record; a deleted
        // account makes its outstanding tokens invalid
        let user = UserRepository::new(state.pool())
            .get_by_id(user_id)
            .await
            .map_err(ApiError::Database)?
            .ok_or_else(|| ApiError::Unauthorized(INVALID_TOKEN.to_owned()))?;

        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for RequireUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;
        check_primary_role(&user, &[Role::User])?;
        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;
        check_primary_role(&user, &[Role::Admin])?;
        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for RequireManufacturer
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;
        check_primary_role(&user, &[Role::Manufacturer])?;
        Ok(Self(user))
    }
}
