//! Cart engine error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors from cart engine operations.
///
/// The first three variants mirror the add-to-cart check order: existence,
/// then duplication, then stock. Which one a caller sees when several
/// conditions hold at once is part of the observable contract.
#[derive(Debug, Error)]
pub enum CartError {
    /// The referenced product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// A cart entry for this (user, product) pair already exists.
    #[error("product already in cart")]
    AlreadyInCart,

    /// The product has no stock left to reserve.
    #[error("not enough stock")]
    OutOfStock,

    /// The cart entry does not exist (or was deleted concurrently).
    #[error("cart item not found")]
    ItemNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for CartError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}
