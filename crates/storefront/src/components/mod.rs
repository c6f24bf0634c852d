//! View components shared by storefront templates.
//!
//! Components are plain data built from domain types; the matching markup
//! lives in `templates/partials/`.

pub mod cart_controls;
pub mod product_card;
pub mod product_image;

pub use cart_controls::{AddToCartButton, ClearCartButton};
pub use product_card::ProductCard;
pub use product_image::{ImageHints, ImageLayout, ImageLoadState, ProductImage};
