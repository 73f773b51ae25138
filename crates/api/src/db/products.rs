//! Product repository and the product side of the catalog integrity layer.
//!
//! Stock deltas tied to cart events are NOT written here; the cart engine
//! owns those inside its transactions (`services::cart`). Any future writer
//! of `stock_quantity` must join that locking discipline.

use rust_decimal::Decimal;
use sqlx::PgPool;

use loommarket_core::{CategoryId, ProductId};

use super::RepositoryError;
use crate::models::Product;

/// Fields accepted when creating or updating a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub featured: bool,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Check whether a product exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM products WHERE product_id = $1)",
        )
        .bind(id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Insert a new product.
    ///
    /// The referenced category must already exist; callers check it first
    /// (and the foreign key backs them up).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products (name, description, category_id, price, stock_quantity, featured)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING product_id, name, description, category_id, price,
                      stock_quantity, featured, created_at
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.category_id.as_i32())
        .bind(input.price)
        .bind(input.stock_quantity)
        .bind(input.featured)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Update an existing product in full.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id does not exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            UPDATE products
            SET name = $1, description = $2, category_id = $3,
                price = $4, stock_quantity = $5, featured = $6
            WHERE product_id = $7
            RETURNING product_id, name, description, category_id, price,
                      stock_quantity, featured, created_at
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.category_id.as_i32())
        .bind(input.price)
        .bind(input.stock_quantity)
        .bind(input.featured)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        product.ok_or(RepositoryError::NotFound)
    }
}
