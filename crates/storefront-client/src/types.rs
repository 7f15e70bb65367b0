//! Wire types for the catalog REST API.
//!
//! `GET /products/` answers with a bare JSON array of products on success and
//! with an `{"error": "..."}` object on failure, sometimes under a 2xx status.
//! `GET /products/categories/` answers with an array of
//! `{"category_name": "..."}` records; other fields on a record are ignored.

use serde::Deserialize;
use storefront_core::Product;

/// One entry of the category list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    pub category_name: String,
}

/// Error body returned by the API in place of a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProductsBody {
    Products(Vec<Product>),
    Error(ErrorPayload),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CategoriesBody {
    Categories(Vec<CategoryRecord>),
    Error(ErrorPayload),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn products_body_accepts_array() {
        let body: ProductsBody =
            serde_json::from_str(r#"[{"id": 1, "name": "Milk", "price_in_RS": 50}]"#).unwrap();
        assert!(matches!(body, ProductsBody::Products(ref p) if p.len() == 1));
    }

    #[test]
    fn products_body_accepts_error_object() {
        let body: ProductsBody =
            serde_json::from_str(r#"{"error": "Category not found"}"#).unwrap();
        assert!(matches!(body, ProductsBody::Error(ref e) if e.error == "Category not found"));
    }

    #[test]
    fn categories_body_ignores_extra_fields() {
        let body: CategoriesBody = serde_json::from_str(
            r#"[{"id": "abc", "category_name": "Tech", "description": "x", "is_active": true}]"#,
        )
        .unwrap();
        assert!(
            matches!(body, CategoriesBody::Categories(ref c) if c[0].category_name == "Tech")
        );
    }

    #[test]
    fn unrelated_object_is_rejected() {
        assert!(serde_json::from_str::<ProductsBody>(r#"{"detail": "nope"}"#).is_err());
    }
}
