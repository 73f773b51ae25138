//! The inventory-consistent cart engine.
//!
//! Cart rows and `products.stock_quantity` must stay mutually consistent
//! under concurrent requests, so both mutations run as single transactions.
//! This service is the sole writer of cart-driven stock deltas; it talks to
//! the pool directly rather than going through the per-table repositories
//! because its statements must share one transaction.
//!
//! # Race handling
//!
//! The stock check is an atomic conditional decrement (`... SET
//! stock_quantity = stock_quantity - 1 WHERE ... AND stock_quantity >= 1`)
//! whose affected-row count replaces a separate read, so two concurrent adds
//! against the last unit cannot both pass. The duplicate check is backed by
//! the `(user_id, product_id)` unique constraint; a raced insert rolls the
//! decrement back and reports the same duplicate error as the pre-check.

mod error;

pub use error::CartError;

use sqlx::PgPool;

use loommarket_core::{CartEntryId, ProductId, UserId};

use crate::models::CartEntry;

/// The cart engine.
pub struct CartService<'a> {
    pool: &'a PgPool,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's cart entries.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the query fails.
    pub async fn entries_for_user(&self, user_id: UserId) -> Result<Vec<CartEntry>, CartError> {
        let entries = sqlx::query_as::<_, CartEntry>(
            r"
            SELECT cart_id, user_id, product_id, order_quantity
            FROM cart
            WHERE user_id = $1
            ORDER BY cart_id
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Reserve one unit of a product for a user.
    ///
    /// Checks run in a fixed order - existence, duplication, stock - and the
    /// whole sequence commits or rolls back as one transaction. The created
    /// entry always has `order_quantity = 1`; the engine never adjusts
    /// quantities upward.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product does not exist.
    /// Returns `CartError::AlreadyInCart` if the pair already has an entry.
    /// Returns `CartError::OutOfStock` if no stock is left.
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<CartEntry, CartError> {
        let mut tx = self.pool.begin().await?;

        // 1) Product must exist
        let product_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM products WHERE product_id = $1)",
        )
        .bind(product_id.as_i32())
        .fetch_one(&mut *tx)
        .await?;

        if !product_exists {
            return Err(CartError::ProductNotFound);
        }

        // 2) No duplicate entry for this (user, product) pair
        let already_in_cart = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM cart WHERE user_id = $1 AND product_id = $2)",
        )
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .fetch_one(&mut *tx)
        .await?;

        if already_in_cart {
            return Err(CartError::AlreadyInCart);
        }

        // 3) Conditional decrement; zero rows affected means no stock left
        let decremented = sqlx::query(
            r"
            UPDATE products
            SET stock_quantity = stock_quantity - 1
            WHERE product_id = $1 AND stock_quantity >= 1
            ",
        )
        .bind(product_id.as_i32())
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            return Err(CartError::OutOfStock);
        }

        // 4) Insert the entry; a unique violation is a duplicate that raced
        //    past the check above, and the rollback restores the decrement
        let entry = sqlx::query_as::<_, CartEntry>(
            r"
            INSERT INTO cart (user_id, product_id, order_quantity)
            VALUES ($1, $2, 1)
            RETURNING cart_id, user_id, product_id, order_quantity
            ",
        )
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return CartError::AlreadyInCart;
            }
            CartError::from(e)
        })?;

        tx.commit().await?;

        Ok(entry)
    }

    /// Release a reservation, restoring the product's stock.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the entry does not exist, or if
    /// a concurrent delete won the race between lookup and delete.
    pub async fn remove(&self, entry_id: CartEntryId) -> Result<(), CartError> {
        let mut tx = self.pool.begin().await?;

        let entry = sqlx::query_as::<_, CartEntry>(
            r"
            SELECT cart_id, user_id, product_id, order_quantity
            FROM cart
            WHERE cart_id = $1
            ",
        )
        .bind(entry_id.as_i32())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(entry) = entry else {
            return Err(CartError::ItemNotFound);
        };

        // Deliberate double-check: a concurrent delete may have removed the
        // row after the lookup, and restoring stock twice would inflate it
        let deleted = sqlx::query("DELETE FROM cart WHERE cart_id = $1")
            .bind(entry_id.as_i32())
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(CartError::ItemNotFound);
        }

        sqlx::query(
            r"
            UPDATE products
            SET stock_quantity = stock_quantity + $1
            WHERE product_id = $2
            ",
        )
        .bind(entry.order_quantity)
        .bind(entry.product_id.as_i32())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }
}
