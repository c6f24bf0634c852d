//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{ProductId, Price};

/// A purchasable catalog item.
///
/// Products are owned by the catalog source and read-only to the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Image URL or static path.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Create a product without a description.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Price, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: image.into(),
            description: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
