//! Session construction and effect execution.
//!
//! Effects run one at a time in the order the session emitted them; each
//! fetch result goes straight back into the session, which drops it if a
//! newer request has been issued meanwhile.

use std::path::Path;

use anyhow::Context;
use storefront_client::CatalogClient;
use storefront_core::{load_dataset, AppConfig, Effect, FetchError, LoadOutcome, Storefront};

/// A session plus the client its fetch effects run against, if remote.
pub(crate) struct Runtime {
    pub(crate) session: Storefront,
    client: Option<CatalogClient>,
}

impl Runtime {
    /// Builds a static session when a dataset path is given, otherwise a
    /// remote session backed by the catalog API.
    pub(crate) fn build(config: &AppConfig, catalog_path: Option<&Path>) -> anyhow::Result<Self> {
        match catalog_path {
            Some(path) => {
                let dataset = load_dataset(path)
                    .with_context(|| format!("loading catalog dataset {}", path.display()))?;
                tracing::info!(
                    path = %path.display(),
                    products = dataset.products.len(),
                    "using static catalog"
                );
                Ok(Self {
                    session: Storefront::with_static_catalog(dataset.products, config.page_size),
                    client: None,
                })
            }
            None => {
                let client = CatalogClient::from_config(config)?;
                tracing::info!(base_url = %config.api_base_url, "using remote catalog");
                Ok(Self {
                    session: Storefront::remote(config.page_size),
                    client: Some(client),
                })
            }
        }
    }

    /// Runs `effects`, returning the notification lines to show the user.
    pub(crate) async fn run_effects(&mut self, effects: Vec<Effect>) -> Vec<String> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::Notify(event) => notices.push(event.to_string()),
                Effect::FetchProducts { ticket, category } => {
                    let result = match &self.client {
                        Some(client) => client
                            .fetch_products(category.as_deref())
                            .await
                            .map_err(FetchError::from),
                        None => Err(FetchError::new("no catalog API configured")),
                    };
                    if self.session.complete_products(ticket, result) == LoadOutcome::Stale {
                        tracing::debug!(seq = ticket.seq(), "product response superseded");
                    }
                }
                Effect::FetchCategories { ticket } => {
                    let result = match &self.client {
                        Some(client) => client
                            .fetch_categories()
                            .await
                            .map_err(FetchError::from),
                        None => Err(FetchError::new("no catalog API configured")),
                    };
                    self.session.complete_categories(ticket, result);
                }
            }
        }
        notices
    }
}
