//! Read-only product and category catalog.
//!
//! The storefront core never mutates catalog data; it is an injected
//! collaborator behind the [`Catalog`] trait. [`StaticCatalog`] deserializes
//! a JSON data set, either the one bundled with the crate or a file named in
//! the configuration.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use verde_core::{CategoryId, Price, ProductId};

/// Bundled catalog data, compiled into the binary.
const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Error loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Merchandising badge shown on product cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    New,
    Sale,
    Featured,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Pre-discount reference price, for display only.
    #[serde(default)]
    pub original_price: Option<Price>,
    pub image: String,
    /// Average review rating on a 1-5 scale.
    pub rating: f64,
    pub review_count: u32,
    pub category: CategoryId,
    #[serde(default)]
    pub badge: Option<Badge>,
    pub in_stock: bool,
}

impl Product {
    /// Discount percentage against the original price, rounded to the
    /// nearest whole percent. `None` when there is no original price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if original.amount() <= Decimal::ZERO {
            return None;
        }
        let fraction = (original.amount() - self.price.amount()) / original.amount();
        let percent = (fraction * Decimal::ONE_HUNDRED).round();
        u32::try_from(percent.mantissa()).ok()
    }
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image: String,
    pub product_count: u32,
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newly badged products first, catalog order otherwise.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    Rating,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "rating" => Ok(Self::Rating),
            other => Err(format!(
                "unknown sort key {other:?} (expected featured, price-asc, price-desc, or rating)"
            )),
        }
    }
}

/// Filter and sort parameters for a product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Restrict to a single category.
    pub category: Option<CategoryId>,
    /// Case-insensitive name substring match.
    pub search: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    pub sort: SortKey,
}

/// Read-only catalog collaborator.
pub trait Catalog {
    /// All products in catalog order.
    fn products(&self) -> &[Product];

    /// All categories.
    fn categories(&self) -> &[Category];

    /// Look up a product by id.
    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products().iter().find(|p| &p.id == id)
    }

    /// Look up a category by id.
    fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories().iter().find(|c| &c.id == id)
    }

    /// Products filtered and sorted per the query.
    fn query(&self, query: &ProductQuery) -> Vec<&Product> {
        let needle = query.search.as_deref().map(str::to_lowercase);

        let mut results: Vec<&Product> = self
            .products()
            .iter()
            .filter(|p| query.category.as_ref().is_none_or(|c| &p.category == c))
            .filter(|p| {
                needle
                    .as_deref()
                    .is_none_or(|n| p.name.to_lowercase().contains(n))
            })
            .filter(|p| query.min_price.is_none_or(|min| p.price.amount() >= min))
            .filter(|p| query.max_price.is_none_or(|max| p.price.amount() <= max))
            .collect();

        sort_products(&mut results, query.sort);
        results
    }
}

/// Stable sort of a product listing.
fn sort_products(products: &mut [&Product], sort: SortKey) {
    match sort {
        SortKey::PriceAsc => products.sort_by_key(|p| p.price.amount()),
        SortKey::PriceDesc => {
            products.sort_by_key(|p| std::cmp::Reverse(p.price.amount()));
        }
        SortKey::Rating => {
            products.sort_by(|a, b| {
                b.rating
                    .partial_cmp(&a.rating)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        SortKey::Featured => {
            // New arrivals surface first, everything else keeps catalog order.
            products.sort_by_key(|p| p.badge != Some(Badge::New));
        }
    }
}

/// An in-memory catalog deserialized from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl StaticCatalog {
    /// Load the catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the bundled data is malformed.
    pub fn bundled() -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(BUNDLED_CATALOG)?)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl Catalog for StaticCatalog {
    fn products(&self) -> &[Product] {
        &self.products
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StaticCatalog {
        StaticCatalog::bundled().expect("bundled catalog parses")
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = catalog();
        assert!(!catalog.products().is_empty());
        assert!(!catalog.categories().is_empty());
    }

    #[test]
    fn test_every_product_references_a_known_category() {
        let catalog = catalog();
        for product in catalog.products() {
            assert!(
                catalog.category(&product.category).is_some(),
                "product {} references unknown category {}",
                product.id,
                product.category
            );
        }
    }

    #[test]
    fn test_product_lookup() {
        let catalog = catalog();
        let first = catalog.products().first().expect("non-empty").clone();
        let found = catalog.product(&first.id).expect("lookup by id");
        assert_eq!(found.name, first.name);
        assert!(catalog.product(&ProductId::new("no-such-product")).is_none());
    }

    #[test]
    fn test_query_by_category() {
        let catalog = catalog();
        let category = catalog.categories().first().expect("non-empty").id.clone();
        let results = catalog.query(&ProductQuery {
            category: Some(category.clone()),
            ..ProductQuery::default()
        });
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.category == category));
    }

    #[test]
    fn test_query_search_is_case_insensitive() {
        let catalog = catalog();
        let name = &catalog.products().first().expect("non-empty").name;
        let needle = name.to_uppercase();
        let results = catalog.query(&ProductQuery {
            search: Some(needle),
            ..ProductQuery::default()
        });
        assert!(results.iter().any(|p| &p.name == name));
    }

    #[test]
    fn test_query_price_sort() {
        let catalog = catalog();
        let results = catalog.query(&ProductQuery {
            sort: SortKey::PriceAsc,
            ..ProductQuery::default()
        });
        let amounts: Vec<_> = results.iter().map(|p| p.price.amount()).collect();
        let mut sorted = amounts.clone();
        sorted.sort();
        assert_eq!(amounts, sorted);
    }

    #[test]
    fn test_discount_percent() {
        let mut product = catalog().products().first().expect("non-empty").clone();
        product.price = Price::from_major(40);
        product.original_price = Some(Price::from_major(50));
        assert_eq!(product.discount_percent(), Some(20));

        product.original_price = None;
        assert_eq!(product.discount_percent(), None);
    }
}
