//! Buttons that trigger cart mutations.
//!
//! Each control renders a small form posting to a `/cart/*` route. With
//! HTMX loaded the post swaps a fragment in place; without it the browser
//! follows the redirect to `/cart`.

use vitrine_core::ProductId;

/// Route for adding a product.
pub const ADD_ACTION: &str = "/cart/add";

/// Route for emptying the cart.
pub const CLEAR_ACTION: &str = "/cart/clear";

/// "Add to cart" control embedded in product cards and detail pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCartButton {
    pub product_id: String,
    pub quantity: u32,
    /// Show a quantity input instead of a fixed quantity.
    pub editable_quantity: bool,
    pub label: &'static str,
}

impl AddToCartButton {
    /// Adds a single unit.
    #[must_use]
    pub fn new(product_id: &ProductId) -> Self {
        Self {
            product_id: product_id.to_string(),
            quantity: 1,
            editable_quantity: false,
            label: "Add to Cart",
        }
    }

    /// Let the visitor pick the quantity.
    #[must_use]
    pub const fn with_quantity_input(mut self) -> Self {
        self.editable_quantity = true;
        self
    }

    #[must_use]
    pub const fn action(&self) -> &'static str {
        ADD_ACTION
    }
}

/// "Clear cart" control on the cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearCartButton {
    pub label: &'static str,
}

impl Default for ClearCartButton {
    fn default() -> Self {
        Self {
            label: "Clear Cart",
        }
    }
}

impl ClearCartButton {
    #[must_use]
    pub const fn action(&self) -> &'static str {
        CLEAR_ACTION
    }
}
