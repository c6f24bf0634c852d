//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::{ProductId, ProductIdError};
pub use price::{CurrencyCode, Price};
pub use product::Product;
