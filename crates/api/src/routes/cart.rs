//! Cart routes.
//!
//! Thin HTTP shims over [`CartService`]; every stock-affecting decision
//! lives in the service's transactions, not here.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;

use loommarket_core::{CartEntryId, ProductId, UserId};

use crate::error::Result;
use crate::middleware::{RequireAuth, RequireUser};
use crate::models::{ApiResponse, CartEntry};
use crate::services::cart::CartService;
use crate::state::AppState;

/// Add-to-cart request body. The target user comes from the body, not the
/// token subject; the gate only proves the caller holds a `user` session.
#[derive(Debug, Deserialize)]
pub struct AddToCartBody {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "productId")]
    pub product_id: ProductId,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(add))
        .route("/{id}", get(list).delete(remove))
}

/// `GET /cart/{id}` - entries for the given user id.
async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<CartEntry>>>> {
    let entries = CartService::new(state.pool())
        .entries_for_user(UserId::new(id))
        .await?;

    Ok(Json(ApiResponse::new(entries)))
}

/// `POST /cart` - reserve one unit of a product.
async fn add(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Json(body): Json<AddToCartBody>,
) -> Result<impl IntoResponse> {
    let entry = CartService::new(state.pool())
        .add(body.user_id, body.product_id)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(entry))))
}

/// `DELETE /cart/{id}` - release a reservation and restore its stock.
async fn remove(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    CartService::new(state.pool())
        .remove(CartEntryId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
