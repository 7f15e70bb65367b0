//! Search and category filtering over a product list.
//!
//! Both predicates are pure and preserve input order. An empty category or
//! an empty search term disables that predicate; when both are disabled the
//! input is returned unchanged. The search term is matched literally,
//! whitespace included.

use crate::products::Product;

/// Committed filter inputs. An empty string means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub category: String,
}

impl FilterState {
    #[must_use]
    pub fn new(search_term: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            category: category.into(),
        }
    }

    /// Returns `true` if at least one predicate would exclude products.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty() || !self.category.is_empty()
    }

    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        filter_products(products, &self.search_term, &self.category)
    }
}

/// Returns the products matching both the category and the search term.
///
/// The category comparison is exact and case-sensitive. The search term is a
/// case-insensitive substring match against the name or the description.
#[must_use]
pub fn filter_products(products: &[Product], search_term: &str, category: &str) -> Vec<Product> {
    let needle = search_term.to_lowercase();
    products
        .iter()
        .filter(|p| matches_category(p, category) && matches_needle(p, &needle))
        .cloned()
        .collect()
}

/// Case-insensitive substring match of `search_term` against name or
/// description. An empty term matches everything.
#[must_use]
pub fn matches_search(product: &Product, search_term: &str) -> bool {
    matches_needle(product, &search_term.to_lowercase())
}

fn matches_category(product: &Product, category: &str) -> bool {
    category.is_empty() || product.category.as_deref() == Some(category)
}

/// `needle` must already be lowercased.
fn matches_needle(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(needle)
        || product
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}
