use super::*;

fn client(base_url: &str) -> CatalogClient {
    CatalogClient::with_base_url(base_url, 5, "storefront-test/0.1", 0, 0)
        .expect("client construction should not fail")
}

#[test]
fn products_url_without_category() {
    let url = client("http://localhost:8000/").products_url(None).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8000/products/");
}

#[test]
fn products_url_with_category_is_encoded() {
    let url = client("http://localhost:8000")
        .products_url(Some("Fruits & Veg"))
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:8000/products/?category=Fruits+%26+Veg"
    );
}

#[test]
fn products_url_ignores_empty_category() {
    let url = client("http://localhost:8000/").products_url(Some("")).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8000/products/");
}

#[test]
fn base_url_path_is_preserved() {
    let c = client("https://shop.example.com/api");
    assert_eq!(
        c.products_url(None).unwrap().as_str(),
        "https://shop.example.com/api/products/"
    );
    assert_eq!(
        c.categories_url().unwrap().as_str(),
        "https://shop.example.com/api/products/categories/"
    );
}

#[test]
fn rejects_unparseable_base_url() {
    let result = CatalogClient::with_base_url("not a url", 5, "ua", 0, 0);
    assert!(
        matches!(result, Err(ClientError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn from_config_uses_configured_base() {
    let config = AppConfig {
        env: storefront_core::Environment::Test,
        api_base_url: "http://catalog.internal:9000/".to_owned(),
        log_level: "info".to_owned(),
        page_size: 6,
        catalog_path: None,
        request_timeout_secs: 5,
        user_agent: "storefront-test/0.1".to_owned(),
        max_retries: 0,
        retry_backoff_base_ms: 0,
    };
    let c = CatalogClient::from_config(&config).unwrap();
    assert_eq!(
        c.products_url(None).unwrap().as_str(),
        "http://catalog.internal:9000/products/"
    );
}
