pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod filter;
pub mod pagination;
pub mod products;
pub mod session;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartEvent};
pub use catalog::{CatalogStore, FetchTicket, LoadOutcome, LoadState};
pub use config::{load_app_config, load_app_config_from_env};
pub use dataset::{load_dataset, Dataset};
pub use filter::{filter_products, matches_search, FilterState};
pub use pagination::{paginate, Page, PaginationState, DEFAULT_PAGE_SIZE};
pub use products::{Category, Product, ProductId};
pub use session::{CatalogMode, Effect, Intent, Screen, Storefront};

/// A remote catalog load that did not produce a usable product list.
///
/// Carries a user-facing message only; transport details stay in the HTTP
/// client's own error type and are logged there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("dataset validation failed: {0}")]
    Validation(String),
}
