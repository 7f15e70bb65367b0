use storefront_core::FetchError;
use thiserror::Error;

const FETCH_FAILED_MESSAGE: &str = "Failed to fetch products. Please try again later.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an `{"error": "..."}` payload.
    #[error("catalog API error: {0}")]
    Api(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by catalog API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Converts a client failure into the message the view shows in place of
/// the product list. Only API-supplied messages are passed through verbatim.
impl From<ClientError> for FetchError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api(message) => FetchError::new(message),
            other => {
                tracing::debug!(error = %other, "mapping client error to generic fetch failure");
                FetchError::new(FETCH_FAILED_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_message_passes_through() {
        let fetch: FetchError = ClientError::Api("No products in category".to_string()).into();
        assert_eq!(fetch.message, "No products in category");
    }

    #[test]
    fn transport_errors_use_generic_message() {
        let fetch: FetchError = ClientError::UnexpectedStatus {
            status: 500,
            url: "http://localhost:8000/products/".to_string(),
        }
        .into();
        assert_eq!(fetch.message, FETCH_FAILED_MESSAGE);

        let fetch: FetchError = ClientError::RateLimited {
            retry_after_secs: 5,
        }
        .into();
        assert_eq!(fetch.message, FETCH_FAILED_MESSAGE);
    }
}
