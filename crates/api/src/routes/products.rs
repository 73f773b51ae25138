//! Product routes.
//!
//! Writes are guarded by the catalog integrity check: the referenced
//! category must exist before a product row is created or updated. Updates
//! additionally require a `manufacturer` session; creation is open, as is
//! the rest of the validated write path.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use loommarket_core::{CategoryId, ProductId};

use crate::db::{CategoryRepository, ProductInput, ProductRepository, RepositoryError};
use crate::error::{ApiError, Result};
use crate::middleware::RequireManufacturer;
use crate::models::{ApiResponse, Product};
use crate::state::AppState;

/// Create/update request body.
#[derive(Debug, Deserialize)]
pub struct ProductBody {
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub price: Decimal,
    pub stock_quantity: i32,
    #[serde(default)]
    pub featured: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/{id}", put(update))
}

/// Field-level validation; the first failing rule wins.
fn validate(body: &ProductBody) -> Result<()> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Product name is required".to_owned()));
    }
    if body.description.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Product description is required".to_owned(),
        ));
    }
    if body.price <= Decimal::ZERO {
        return Err(ApiError::BadRequest(
            "Price must be a positive number".to_owned(),
        ));
    }
    if body.stock_quantity < 0 {
        return Err(ApiError::BadRequest(
            "Stock quantity must be zero or a positive number".to_owned(),
        ));
    }
    Ok(())
}

/// The referenced category must exist before any product write.
async fn require_category(state: &AppState, id: CategoryId) -> Result<()> {
    let exists = CategoryRepository::new(state.pool()).exists(id).await?;
    if exists {
        Ok(())
    } else {
        Err(ApiError::UnprocessableEntity("category not found".to_owned()))
    }
}

fn input_from(body: ProductBody) -> ProductInput {
    ProductInput {
        name: body.name,
        description: body.description,
        category_id: body.category_id,
        price: body.price,
        stock_quantity: body.stock_quantity,
        featured: body.featured,
    }
}

/// `POST /products`
async fn create(
    State(state): State<AppState>,
    Json(body): Json<ProductBody>,
) -> Result<impl IntoResponse> {
    validate(&body)?;
    require_category(&state, body.category_id).await?;

    let product = ProductRepository::new(state.pool())
        .create(&input_from(body))
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(product))))
}

/// `PUT /products/{id}`
async fn update(
    RequireManufacturer(_manufacturer): RequireManufacturer,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ProductBody>,
) -> Result<Json<ApiResponse<Product>>> {
    validate(&body)?;
    require_category(&state, body.category_id).await?;

    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &input_from(body))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => ApiError::NotFound("Product not found".to_owned()),
            other => ApiError::Database(other),
        })?;

    Ok(Json(ApiResponse::new(product)))
}
