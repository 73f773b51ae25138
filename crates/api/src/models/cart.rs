//! Cart domain types.

use serde::Serialize;

use loommarket_core::{CartEntryId, ProductId, UserId};

/// One unpurchased reservation linking a user to a product.
///
/// At most one entry exists per (user, product) pair; entries are created by
/// add-to-cart and destroyed by delete, never updated in place.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartEntry {
    pub cart_id: CartEntryId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub order_quantity: i32,
}
