//! Business logic services.
//!
//! - [`token`] - Signed bearer token issuance and verification
//! - [`auth`] - Signup/login (the session issuer)
//! - [`cart`] - The inventory-consistent cart engine

pub mod auth;
pub mod cart;
pub mod token;
