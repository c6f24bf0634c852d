//! Product catalog loaded from a JSON file at startup.
//!
//! The catalog file is a JSON array of products:
//!
//! ```json
//! [
//!   {
//!     "id": "tee-classic",
//!     "name": "Classic Tee",
//!     "price": { "amount": "19.99", "currency_code": "USD" },
//!     "image": "/static/images/tee-classic.jpg",
//!     "description": "Heavyweight cotton."
//!   }
//! ]
//! ```
//!
//! All products must share one currency so cart subtotals stay meaningful.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use vitrine_core::{CurrencyCode, Product, ProductId};

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),
    #[error("product {id} is priced in {found}, expected {expected}")]
    MixedCurrency {
        id: ProductId,
        expected: &'static str,
        found: &'static str,
    },
}

/// Read-only, in-memory product catalog.
///
/// Cheaply cloneable; products keep the order they appear in the file.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
    index: Arc<HashMap<ProductId, usize>>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed, or the
    /// products fail validation.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is invalid or the products fail validation.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(raw)?;
        Self::from_products(products)
    }

    /// Build a catalog from products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on duplicate ids or mixed currencies.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        let currency = products.first().map(|p| p.price.currency_code);

        for (position, product) in products.iter().enumerate() {
            if let Some(expected) = currency
                && product.price.currency_code != expected
            {
                return Err(CatalogError::MixedCurrency {
                    id: product.id.clone(),
                    expected: expected.code(),
                    found: product.price.currency_code.code(),
                });
            }

            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        Ok(Self {
            products: Arc::new(products),
            index: Arc::new(index),
        })
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|&i| self.products.get(i))
    }

    /// The currency every product is priced in.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.products
            .first()
            .map_or_else(CurrencyCode::default, |p| p.price.currency_code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id": "tee", "name": "Tee", "price": {"amount": "19.99", "currency_code": "USD"}, "image": "/static/images/tee.jpg"},
        {"id": "mug", "name": "Mug", "price": {"amount": "8.50", "currency_code": "USD"}, "image": "/static/images/mug.jpg", "description": "Stoneware."}
    ]"#;

    #[test]
    fn test_from_json_keeps_order_and_indexes() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let ids: Vec<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["tee", "mug"]);

        let mug = catalog.get(&"mug".parse().unwrap()).unwrap();
        assert_eq!(mug.price.display(), "$8.50");
        assert_eq!(mug.description.as_deref(), Some("Stoneware."));
        assert!(catalog.get(&"hat".parse().unwrap()).is_none());
    }

    #[test]
    fn test_currency_follows_products() {
        assert_eq!(Catalog::from_json(CATALOG).unwrap().currency(), CurrencyCode::USD);

        let raw = r#"[{"id": "tee", "name": "Tee", "price": {"amount": "1.00", "currency_code": "EUR"}, "image": "/a.jpg"}]"#;
        assert_eq!(Catalog::from_json(raw).unwrap().currency(), CurrencyCode::EUR);
        assert_eq!(Catalog::from_json("[]").unwrap().currency(), CurrencyCode::USD);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let raw = r#"[
            {"id": "tee", "name": "Tee", "price": {"amount": "1.00"}, "image": "/a.jpg"},
            {"id": "tee", "name": "Tee 2", "price": {"amount": "2.00"}, "image": "/b.jpg"}
        ]"#;
        let err = Catalog::from_json(raw).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProduct(id) if id.as_str() == "tee"));
    }

    #[test]
    fn test_mixed_currency_rejected() {
        let raw = r#"[
            {"id": "tee", "name": "Tee", "price": {"amount": "1.00", "currency_code": "USD"}, "image": "/a.jpg"},
            {"id": "mug", "name": "Mug", "price": {"amount": "2.00", "currency_code": "EUR"}, "image": "/b.jpg"}
        ]"#;
        let err = Catalog::from_json(raw).unwrap_err();
        assert!(matches!(err, CatalogError::MixedCurrency { found: "EUR", .. }));
    }

    #[test]
    fn test_empty_id_rejected_by_parser() {
        let raw = r#"[{"id": "", "name": "Tee", "price": {"amount": "1.00"}, "image": "/a.jpg"}]"#;
        assert!(matches!(Catalog::from_json(raw), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
