//! Domain types for the API.
//!
//! Database row mapping lives in `db/`; these types are what services and
//! route handlers pass around.

pub mod cart;
pub mod catalog;
pub mod response;
pub mod user;

pub use cart::CartEntry;
pub use catalog::{Category, Product};
pub use response::ApiResponse;
pub use user::User;
