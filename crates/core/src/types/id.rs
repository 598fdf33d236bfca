//! Newtype ID for type-safe product references.
//!
//! Product ids come from the catalog and are opaque strings; wrapping them
//! prevents accidentally mixing them with other string data such as titles
//! or image references.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input string is empty.
    #[error("product id cannot be empty")]
    Empty,
    /// The input string contains whitespace.
    #[error("product id cannot contain whitespace")]
    ContainsWhitespace,
}

/// A product identifier, stable for the lifetime of the catalog entry.
///
/// # Example
///
/// ```rust
/// use go_marketplace_core::ProductId;
///
/// let id = ProductId::new("p-1234");
/// assert_eq!(id.as_str(), "p-1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product ID from a trusted string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a `ProductId` from untrusted input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains whitespace.
    pub fn parse(input: &str) -> Result<Self, ProductIdError> {
        if input.is_empty() {
            return Err(ProductIdError::Empty);
        }
        if input.chars().any(char::is_whitespace) {
            return Err(ProductIdError::ContainsWhitespace);
        }
        Ok(Self(input.to_owned()))
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display_matches_inner() {
        let id = ProductId::new("shirt-01");
        assert_eq!(id.to_string(), "shirt-01");
    }

    #[test]
    fn test_product_id_serializes_transparently() {
        let id = ProductId::new("p1");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"p1\"");
    }

    #[test]
    fn test_parse_accepts_catalog_ids() {
        assert_eq!(ProductId::parse("p-1234"), Ok(ProductId::new("p-1234")));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Empty));
    }

    #[test]
    fn test_parse_rejects_whitespace() {
        assert_eq!(
            ProductId::parse("p 1"),
            Err(ProductIdError::ContainsWhitespace)
        );
    }
}
