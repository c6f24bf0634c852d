//! Cart snapshot types.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price, Product, ProductId};

/// One distinct product in the cart together with its quantity.
///
/// The quantity is never zero; a line whose quantity drops to zero is
/// removed from the cart instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: NonZeroU32,
}

impl CartItem {
    /// Quantity as a plain integer.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Product price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity.get())
    }
}

/// Snapshot of a cart.
///
/// Items keep insertion order for display. There is at most one item per
/// product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity()))
    }

    /// Sum of `price * quantity` over all lines.
    ///
    /// Uses the currency of the first line; an empty cart is zero in the
    /// default currency.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.subtotal_in(CurrencyCode::default())
    }

    /// Sum of all line totals, with an empty cart priced at zero in
    /// `empty_currency`. Saturates instead of overflowing.
    #[must_use]
    pub fn subtotal_in(&self, empty_currency: CurrencyCode) -> Price {
        let currency = self
            .items
            .first()
            .map_or(empty_currency, |item| item.product.price.currency_code);

        self.items.iter().fold(Price::zero(currency), |total, item| {
            Price::new(total.amount.saturating_add(item.line_total().amount), currency)
        })
    }

    /// Find the line for a product.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product.id == product_id)
    }

    pub(crate) fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product.id == product_id)
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<CartItem> {
        &mut self.items
    }
}
