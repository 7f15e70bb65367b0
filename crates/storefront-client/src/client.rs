//! HTTP client for the catalog REST API.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use storefront_core::{matches_search, AppConfig, Category, Product};

use crate::error::ClientError;
use crate::retry::retry_with_backoff;
use crate::types::{CategoriesBody, ErrorPayload, ProductsBody};

/// Client for the catalog API's `/products/` and `/products/categories/`
/// endpoints.
///
/// Non-2xx responses and `{"error": ...}` payloads surface as typed
/// [`ClientError`]s. Transient failures are retried according to the
/// configured retry policy.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay for exponential back-off: `backoff_base_ms * 2^(retry - 1)`.
    backoff_base_ms: u64,
}

impl CatalogClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `api_base_url` does not
    /// parse, or [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Creates a client against an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so that joining "products/" appends a
        // segment instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches the product list, optionally restricted to one category.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] when the API returns an `{"error": ...}` payload.
    /// - [`ClientError::RateLimited`]: HTTP 429 after all retries.
    /// - [`ClientError::NotFound`]: HTTP 404.
    /// - [`ClientError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ClientError::Http`]: network or TLS failure.
    /// - [`ClientError::Deserialize`]: body is neither a product array nor an error payload.
    pub async fn fetch_products(&self, category: Option<&str>) -> Result<Vec<Product>, ClientError> {
        let url = self.products_url(category)?;
        let body: ProductsBody = self.get_json(url, "product list").await?;
        match body {
            ProductsBody::Products(products) => {
                tracing::info!(count = products.len(), category, "fetched products");
                Ok(products)
            }
            ProductsBody::Error(ErrorPayload { error }) => Err(ClientError::Api(error)),
        }
    }

    /// Fetches the category names offered by the API, in server order.
    ///
    /// # Errors
    ///
    /// Same error cases as [`Self::fetch_products`].
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ClientError> {
        let url = self.categories_url()?;
        let body: CategoriesBody = self.get_json(url, "category list").await?;
        match body {
            CategoriesBody::Categories(records) => {
                tracing::info!(count = records.len(), "fetched categories");
                Ok(records.into_iter().map(|r| r.category_name).collect())
            }
            CategoriesBody::Error(ErrorPayload { error }) => Err(ClientError::Api(error)),
        }
    }

    /// Fetches the full product list and keeps products whose name or
    /// description contains `term`, ignoring case. An empty term returns
    /// everything.
    ///
    /// # Errors
    ///
    /// Same error cases as [`Self::fetch_products`].
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, ClientError> {
        let products = self.fetch_products(None).await?;
        Ok(products
            .into_iter()
            .filter(|p| matches_search(p, term))
            .collect())
    }

    /// Issues a GET with retries and decodes the body.
    ///
    /// An `{"error": ...}` body is reported as [`ClientError::Api`] whatever
    /// the status code, since the API uses it for both 2xx and 4xx answers.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, ClientError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                tracing::debug!(%url, "catalog API request");
                let response = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ClientError::RateLimited { retry_after_secs });
                }

                let body = response.text().await?;

                if let Ok(ErrorPayload { error }) = serde_json::from_str::<ErrorPayload>(&body) {
                    return Err(ClientError::Api(error));
                }

                if status == StatusCode::NOT_FOUND {
                    return Err(ClientError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(ClientError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                serde_json::from_str::<T>(&body).map_err(|e| ClientError::Deserialize {
                    context: format!("{context} from {url}"),
                    source: e,
                })
            }
        })
        .await
    }

    /// `{base}/products/`, with `?category=` when a non-empty category is given.
    fn products_url(&self, category: Option<&str>) -> Result<Url, ClientError> {
        let mut url = self.join("products/")?;
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            url.query_pairs_mut().append_pair("category", category);
        }
        Ok(url)
    }

    fn categories_url(&self) -> Result<Url, ClientError> {
        self.join("products/categories/")
    }

    fn join(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
