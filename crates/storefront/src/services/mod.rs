//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Session-backed cart built on `vitrine_core::CartStore`
//! - `identity` - Hosted identity providers for the sign-in / sign-up pages

pub mod cart;
pub mod identity;
