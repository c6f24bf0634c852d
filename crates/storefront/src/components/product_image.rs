//! Product image with a blur-up loading transition.
//!
//! Every rendered image starts [`ImageLoadState::Pending`] (blurred, grayscale,
//! slightly zoomed). `static/js/product-image.js` swaps in the
//! [`ImageLoadState::Ready`] classes once the browser fires `load`. Failed
//! loads stay pending.

use vitrine_core::Product;

/// Fixed-layout width in pixels.
pub const FIXED_WIDTH: u32 = 400;

/// Fixed-layout height in pixels.
pub const FIXED_HEIGHT: u32 = 700;

/// Responsive `sizes` hint shared by all product images.
pub const SIZES: &str = "(max-width: 768px) 100vw, (max-width: 1200px) 50vw, 33vw";

/// Classes applied in every state.
const BASE_CLASS: &str = "object-cover";

/// Loading state of one rendered image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageLoadState {
    #[default]
    Pending,
    Ready,
}

impl ImageLoadState {
    /// State after the image has loaded. `Ready` is terminal.
    #[must_use]
    pub const fn loaded(self) -> Self {
        Self::Ready
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
        }
    }

    /// Transition classes for this state.
    #[must_use]
    pub const fn classes(self) -> &'static str {
        match self {
            Self::Pending => "scale-110 blur-3xl grayscale",
            Self::Ready => "scale-100 blur-0 grayscale-0",
        }
    }
}

/// How the image is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLayout {
    /// Fill the positioned parent.
    Fill,
    /// Intrinsic dimensions.
    Fixed { width: u32, height: u32 },
}

/// Optional display hints from the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageHints {
    /// Fill the parent instead of using fixed dimensions.
    pub fill: bool,
    /// Load eagerly with high fetch priority (above-the-fold images).
    pub priority: bool,
}

/// Image view for `partials/product_image.html`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub src: String,
    pub alt: String,
    pub layout: ImageLayout,
    pub priority: bool,
    pub state: ImageLoadState,
}

impl ProductImage {
    /// Image for a product, in the pending state.
    #[must_use]
    pub fn new(product: &Product, hints: ImageHints) -> Self {
        let layout = if hints.fill {
            ImageLayout::Fill
        } else {
            ImageLayout::Fixed {
                width: FIXED_WIDTH,
                height: FIXED_HEIGHT,
            }
        };

        Self {
            src: product.image.clone(),
            alt: product.name.clone(),
            layout,
            priority: hints.priority,
            state: ImageLoadState::Pending,
        }
    }

    /// Mark the image loaded.
    pub const fn mark_loaded(&mut self) {
        self.state = self.state.loaded();
    }

    /// Classes for the current state.
    #[must_use]
    pub fn class(&self) -> String {
        Self::class_for(self.state)
    }

    /// Classes the image switches to once loaded.
    #[must_use]
    pub fn ready_class(&self) -> String {
        Self::class_for(ImageLoadState::Ready)
    }

    fn class_for(state: ImageLoadState) -> String {
        format!("{BASE_CLASS} {}", state.classes())
    }

    #[must_use]
    pub const fn sizes(&self) -> &'static str {
        SIZES
    }

    #[must_use]
    pub const fn is_fill(&self) -> bool {
        matches!(self.layout, ImageLayout::Fill)
    }

    /// Width attribute; `None` for fill layout.
    #[must_use]
    pub const fn width(&self) -> Option<u32> {
        match self.layout {
            ImageLayout::Fixed { width, .. } => Some(width),
            ImageLayout::Fill => None,
        }
    }

    /// Height attribute; `None` for fill layout.
    #[must_use]
    pub const fn height(&self) -> Option<u32> {
        match self.layout {
            ImageLayout::Fixed { height, .. } => Some(height),
            ImageLayout::Fill => None,
        }
    }

    /// `loading` attribute.
    #[must_use]
    pub const fn loading(&self) -> &'static str {
        if self.priority { "eager" } else { "lazy" }
    }

    /// `fetchpriority` attribute.
    #[must_use]
    pub const fn fetch_priority(&self) -> &'static str {
        if self.priority { "high" } else { "auto" }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrine_core::{CurrencyCode, Price, ProductId};

    use super::*;

    fn product() -> Product {
        Product::new(
            ProductId::parse("tee").unwrap(),
            "Classic Tee",
            Price::from_cents(1999, CurrencyCode::USD),
            "/static/images/tee.jpg",
        )
    }

    #[test]
    fn test_starts_pending() {
        let image = ProductImage::new(&product(), ImageHints::default());
        assert_eq!(image.state, ImageLoadState::Pending);
        assert_eq!(image.class(), "object-cover scale-110 blur-3xl grayscale");
        assert_eq!(image.alt, "Classic Tee");
    }

    #[test]
    fn test_load_is_terminal() {
        let mut image = ProductImage::new(&product(), ImageHints::default());
        image.mark_loaded();
        assert_eq!(image.state, ImageLoadState::Ready);
        image.mark_loaded();
        assert_eq!(image.state, ImageLoadState::Ready);
        assert_eq!(image.class(), image.ready_class());
    }

    #[test]
    fn test_fixed_layout_dimensions() {
        let image = ProductImage::new(&product(), ImageHints::default());
        assert!(!image.is_fill());
        assert_eq!(image.width(), Some(400));
        assert_eq!(image.height(), Some(700));
        assert_eq!(image.loading(), "lazy");
    }

    #[test]
    fn test_fill_priority_hints() {
        let image = ProductImage::new(
            &product(),
            ImageHints {
                fill: true,
                priority: true,
            },
        );
        assert!(image.is_fill());
        assert_eq!(image.width(), None);
        assert_eq!(image.loading(), "eager");
        assert_eq!(image.fetch_priority(), "high");
    }
}
