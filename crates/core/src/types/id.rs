//! Newtype identifier for catalog products.
//!
//! Product identifiers come from the catalog source as slugs
//! (e.g. `"tee-classic"`). They appear verbatim in URLs and form fields, so
//! only ASCII letters, digits, `-`, `_` and `.` are accepted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a product ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductIdError {
    /// The identifier was empty or only whitespace.
    #[error("product id cannot be empty")]
    Empty,

    /// The identifier contained a character outside `[A-Za-z0-9._-]`.
    #[error("product id contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A type-safe product identifier.
///
/// # Example
///
/// ```rust
/// # use vitrine_core::ProductId;
/// let id: ProductId = "tee-classic".parse().unwrap();
/// assert_eq!(id.as_str(), "tee-classic");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Create a product ID, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ProductIdError::Empty` if nothing remains after trimming, or
    /// `ProductIdError::InvalidCharacter` for characters unsafe in a URL path.
    pub fn parse(id: &str) -> Result<Self, ProductIdError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ProductIdError::Empty);
        }
        if let Some(c) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(ProductIdError::InvalidCharacter(c));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let id = ProductId::parse("  mug-01 ").unwrap();
        assert_eq!(id.as_str(), "mug-01");
        assert_eq!(id.to_string(), "mug-01");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Empty));
        assert_eq!(ProductId::parse("   "), Err(ProductIdError::Empty));
    }

    #[test]
    fn test_parse_rejects_url_unsafe_characters() {
        assert_eq!(
            ProductId::parse("tee classic"),
            Err(ProductIdError::InvalidCharacter(' '))
        );
        assert_eq!(
            ProductId::parse("tee/1"),
            Err(ProductIdError::InvalidCharacter('/'))
        );
        assert!(ProductId::parse("Tee_v2.1-blue").is_ok());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id: ProductId = "cap-02".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"cap-02\"");

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<ProductId>("\"  \"").is_err());
    }
}
