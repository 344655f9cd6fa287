//! Catalog holding and live search filtering.

use order_desk_core::{Product, ProductId};
use tracing::{info, instrument, warn};

use crate::error::DeskError;
use crate::store::DataStore;

/// Filter `products` by a case-insensitive substring `query`.
///
/// A product matches when its name, description, or decimal id contains the
/// query as typed. Missing names and descriptions match as empty strings. An
/// empty or whitespace-only query returns every product. Order is preserved.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    if query.trim().is_empty() {
        return products.iter().collect();
    }

    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| matches(product, &needle))
        .collect()
}

fn matches(product: &Product, needle: &str) -> bool {
    product.name_or_empty().to_lowercase().contains(needle)
        || product.description_or_empty().to_lowercase().contains(needle)
        || product.id.to_string().contains(needle)
}

/// The fetched product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Fetch a catalog from the store.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::FetchFailed`] if the listing fails.
    pub async fn fetch<D: DataStore>(store: &D) -> Result<Self, DeskError> {
        let mut catalog = Self::default();
        catalog.refresh(store).await?;
        Ok(catalog)
    }

    /// Replace the product list with a fresh listing.
    ///
    /// On failure the current list is kept as it was.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::FetchFailed`] if the listing fails.
    #[instrument(skip_all)]
    pub async fn refresh<D: DataStore>(&mut self, store: &D) -> Result<(), DeskError> {
        match store.list_products().await {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                self.products = products;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed, keeping previous listing");
                Err(DeskError::FetchFailed(e))
            }
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Look a product up, failing with [`DeskError::UnknownProduct`].
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::UnknownProduct`] if `id` is not listed.
    pub fn require(&self, id: ProductId) -> Result<&Product, DeskError> {
        self.find(id).ok_or(DeskError::UnknownProduct(id))
    }

    /// [`filter_products`] over this catalog.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        filter_products(&self.products, query)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(ProductId::new(1), "Laptop", "Slim 14 inch notebook"),
            Product::new(ProductId::new(2), "Gaming Laptop", "RGB keyboard"),
            Product::new(ProductId::new(3), "Car", "Red hatchback"),
            Product {
                id: ProductId::new(14),
                name: None,
                description: None,
            },
        ]
    }

    fn ids(products: &[&Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let products = catalog();
        assert_eq!(ids(&filter_products(&products, "")), vec![1, 2, 3, 14]);
        assert_eq!(ids(&filter_products(&products, "   \t")), vec![1, 2, 3, 14]);
    }

    #[test]
    fn test_case_insensitive_name_match() {
        let products = catalog();
        assert_eq!(ids(&filter_products(&products, "LAPTOP")), vec![1, 2]);
    }

    #[test]
    fn test_description_match() {
        let products = catalog();
        assert_eq!(ids(&filter_products(&products, "hatch")), vec![3]);
    }

    #[test]
    fn test_id_substring_match() {
        let products = catalog();
        // "1" appears in id 1, id 14 and the "14 inch" description of id 1
        assert_eq!(ids(&filter_products(&products, "1")), vec![1, 14]);
        assert_eq!(ids(&filter_products(&products, "4")), vec![1, 14]);
    }

    #[test]
    fn test_missing_fields_do_not_match_text() {
        let products = catalog();
        assert!(filter_products(&products, "none").is_empty());
    }

    #[test]
    fn test_padded_query_matched_literally() {
        let products = catalog();
        assert!(filter_products(&products, "laptop ").is_empty());
        assert!(filter_products(&products, " car").is_empty());
        // Inner spaces are part of the substring
        assert_eq!(ids(&filter_products(&products, "gaming l")), vec![2]);
        assert_eq!(ids(&filter_products(&products, "14 inch")), vec![1]);
    }

    #[test]
    fn test_catalog_require() {
        let catalog = Catalog::new(catalog());
        assert_eq!(catalog.require(ProductId::new(3)).unwrap().name_or_empty(), "Car");
        assert!(matches!(
            catalog.require(ProductId::new(99)),
            Err(DeskError::UnknownProduct(_))
        ));
    }
}
