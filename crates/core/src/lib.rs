//! Vitrine Core - Catalog and cart domain types.
//!
//! This crate provides the types shared by the Vitrine storefront:
//! - [`types`] - Product identifiers, prices, and catalog products
//! - [`cart`] - Cart line items, cart state, and the observable cart store
//!
//! # Architecture
//!
//! The core crate contains only types and in-memory logic - no I/O, no HTTP,
//! no sessions. The storefront decides where a cart lives and wires observers
//! into the [`CartStore`] to persist or log changes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{CartItem, CartState, CartStore, SubscriptionId};
pub use types::*;
