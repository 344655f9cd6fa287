//! Catalog product records.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// An immutable catalog entry from the `products` table.
///
/// The catalog is not guaranteed to fill every column, so `name` and
/// `description` are optional. Use [`Product::name_or_empty`] and
/// [`Product::description_or_empty`] where a string is always needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "productname", default)]
    pub name: Option<String>,
    #[serde(rename = "productdescription", default)]
    pub description: Option<String>,
}

impl Product {
    /// Create a product with both text fields set.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }

    /// Product name, or `""` when the catalog row has none.
    #[must_use]
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Product description, or `""` when the catalog row has none.
    #[must_use]
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_row() {
        let json = r#"{"id": 1, "productname": "Laptop", "productdescription": "14 inch", "created_at": "2024-01-01"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.name_or_empty(), "Laptop");
        assert_eq!(product.description_or_empty(), "14 inch");
    }

    #[test]
    fn test_missing_text_fields_are_empty() {
        let product: Product = serde_json::from_str(r#"{"id": 3, "productname": null}"#).unwrap();
        assert_eq!(product.name, None);
        assert_eq!(product.name_or_empty(), "");
        assert_eq!(product.description_or_empty(), "");
    }
}
