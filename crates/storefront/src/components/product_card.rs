//! Product tile for catalog grids.

use vitrine_core::Product;

use super::{AddToCartButton, ImageHints, ProductImage};

/// Clickable product tile linking to the product detail page, with an
/// embedded add-to-cart control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub href: String,
    pub name: String,
    pub price: String,
    pub image: ProductImage,
    pub add_to_cart: AddToCartButton,
}

impl ProductCard {
    /// Build a card. `priority` marks above-the-fold cards whose images load eagerly.
    #[must_use]
    pub fn new(product: &Product, priority: bool) -> Self {
        Self {
            href: product_href(product),
            name: product.name.clone(),
            price: product.price.display(),
            image: ProductImage::new(
                product,
                ImageHints {
                    fill: true,
                    priority,
                },
            ),
            add_to_cart: AddToCartButton::new(&product.id),
        }
    }

    /// Cards for a catalog grid; the first `above_fold` get priority images.
    #[must_use]
    pub fn grid(products: &[Product], above_fold: usize) -> Vec<Self> {
        products
            .iter()
            .enumerate()
            .map(|(i, product)| Self::new(product, i < above_fold))
            .collect()
    }
}

/// Detail route for a product.
#[must_use]
pub fn product_href(product: &Product) -> String {
    format!("/products/{}", product.id)
}
