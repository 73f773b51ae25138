//! Catalog domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use loommarket_core::{CategoryId, ProductId};

/// A product category.
///
/// Serializes with the wire field names the category endpoints expose
/// (`categoryId`/`categoryName`).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    #[serde(rename = "categoryId")]
    pub category_id: CategoryId,
    #[serde(rename = "categoryName")]
    pub category_name: String,
}

/// A catalog product.
///
/// `stock_quantity` is the count available for reservation; the cart engine
/// is the sole writer of cart-driven deltas to it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}
