//! Category routes.
//!
//! Categories carry the catalog's integrity rules: names are unique, and a
//! category referenced by products cannot be deleted. The repository reports
//! those as [`RepositoryError::Conflict`] with the caller-facing message
//! already formatted; this module only maps them onto statuses.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;

use loommarket_core::CategoryId;

use crate::db::{CategoryRepository, RepositoryError};
use crate::error::{ApiError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{ApiResponse, Category};
use crate::state::AppState;

/// Create/rename request body.
///
/// `default` keeps a missing field on the "required" path instead of a
/// deserialization rejection, matching the empty-string case.
#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    #[serde(rename = "categoryName", default)]
    pub category_name: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(delete))
}

/// Reject blank names before touching the store.
fn required_name(body: &CategoryBody) -> Result<&str> {
    let name = body.category_name.trim();
    if name.is_empty() {
        return Err(ApiError::UnprocessableEntity(
            "Category Name is required".to_owned(),
        ));
    }
    Ok(name)
}

/// Map repository failures onto the category routes' contract.
fn map_repo_error(err: RepositoryError) -> ApiError {
    match err {
        RepositoryError::Conflict(msg) => ApiError::Conflict(msg),
        RepositoryError::NotFound => ApiError::NotFound("Category not found".to_owned()),
        other => ApiError::Database(other),
    }
}

/// `GET /categories`
async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Category>>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(ApiResponse::new(categories)))
}

/// `POST /categories`
async fn create(
    State(state): State<AppState>,
    Json(body): Json<CategoryBody>,
) -> Result<impl IntoResponse> {
    let name = required_name(&body)?;

    let category = CategoryRepository::new(state.pool())
        .create(name)
        .await
        .map_err(map_repo_error)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(category))))
}

/// `PUT /categories/{id}`
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<CategoryBody>,
) -> Result<Json<ApiResponse<Category>>> {
    let name = required_name(&body)?;

    let category = CategoryRepository::new(state.pool())
        .update(CategoryId::new(id), name)
        .await
        .map_err(map_repo_error)?;

    Ok(Json(ApiResponse::new(category)))
}

/// `DELETE /categories/{id}`
async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    CategoryRepository::new(state.pool())
        .delete(CategoryId::new(id))
        .await
        .map_err(map_repo_error)?;

    Ok(StatusCode::NO_CONTENT)
}
