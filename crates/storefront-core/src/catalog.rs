//! Catalog store: the current product snapshot and its category list.
//!
//! A snapshot is always replaced wholesale. Remote loads are tagged with a
//! [`FetchTicket`]; only the most recently issued ticket of each kind may
//! complete; older ones are discarded as stale, so overlapping fetches
//! resolve to whatever was requested last rather than whatever arrived last.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::products::{Category, Product, ProductId};
use crate::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Products,
    Categories,
}

/// Identity of one in-flight remote load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    kind: FetchKind,
    seq: u64,
    /// Product load restricted to one category.
    scoped: bool,
}

impl FetchTicket {
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Whether a completed load was installed or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(FetchError),
}

#[derive(Debug, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    remote_categories: Option<Vec<Category>>,
    /// Categories seen in product snapshots. Only an unscoped snapshot
    /// replaces the list; a category-scoped one can only add to it.
    derived_categories: Vec<Category>,
    state: LoadState,
    loaded_at: Option<DateTime<Utc>>,
    product_seq: u64,
    category_seq: u64,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `products`, e.g. from a static dataset.
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut store = Self::new();
        store.replace(products);
        store
    }

    /// Installs a new snapshot, dropping the previous one entirely.
    ///
    /// Products are normalized. If two products share an id, the first one
    /// wins. Returns the number of products installed.
    pub fn replace(&mut self, products: Vec<Product>) -> usize {
        self.install(products, false)
    }

    fn install(&mut self, products: Vec<Product>, scoped: bool) -> usize {
        let received = products.len();
        let mut seen = HashSet::with_capacity(received);
        let mut installed = Vec::with_capacity(received);
        for product in products {
            if seen.insert(product.id) {
                installed.push(product.normalized());
            } else {
                tracing::warn!(product_id = product.id, "dropping product with duplicate id");
            }
        }

        self.products = installed;
        let snapshot_categories = derive_categories(&self.products);
        if scoped {
            let known = std::mem::take(&mut self.derived_categories);
            self.derived_categories =
                dedup_categories(known.into_iter().chain(snapshot_categories));
        } else {
            self.derived_categories = snapshot_categories;
        }
        self.state = LoadState::Ready;
        let now = Utc::now();
        self.loaded_at = Some(now);
        tracing::info!(
            received,
            installed = self.products.len(),
            loaded_at = %now,
            "catalog snapshot replaced"
        );
        self.products.len()
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Categories to offer in the filter control.
    ///
    /// Uses the remote category list once one has loaded, otherwise the
    /// categories derived from product snapshots. A snapshot fetched for a
    /// single category never narrows that derived list.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        match &self.remote_categories {
            Some(remote) => remote.clone(),
            None => self.derived_categories.clone(),
        }
    }

    /// Starts a load of the full product list. Any earlier product ticket
    /// becomes stale.
    pub fn begin_products_load(&mut self) -> FetchTicket {
        self.issue_products_ticket(false)
    }

    /// Starts a product load restricted to one category. Any earlier product
    /// ticket becomes stale.
    pub fn begin_scoped_products_load(&mut self) -> FetchTicket {
        self.issue_products_ticket(true)
    }

    fn issue_products_ticket(&mut self, scoped: bool) -> FetchTicket {
        self.product_seq += 1;
        self.state = LoadState::Loading;
        FetchTicket {
            kind: FetchKind::Products,
            seq: self.product_seq,
            scoped,
        }
    }

    /// Completes a product load started by [`Self::begin_products_load`].
    ///
    /// A failure clears the snapshot and moves the store to
    /// [`LoadState::Failed`], so the view never shows stale products under an
    /// error.
    pub fn complete_products_load(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Product>, FetchError>,
    ) -> LoadOutcome {
        if ticket.kind != FetchKind::Products || ticket.seq != self.product_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.product_seq,
                "discarding stale product response"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(products) => {
                self.install(products, ticket.scoped);
            }
            Err(err) => {
                tracing::warn!(error = %err, "product load failed");
                self.products.clear();
                self.state = LoadState::Failed(err);
            }
        }
        LoadOutcome::Applied
    }

    /// Starts a category list load. Any earlier category ticket becomes stale.
    pub fn begin_categories_load(&mut self) -> FetchTicket {
        self.category_seq += 1;
        FetchTicket {
            kind: FetchKind::Categories,
            seq: self.category_seq,
            scoped: false,
        }
    }

    /// Completes a category load. A failure keeps whatever list was in use
    /// before and never touches the product load state.
    pub fn complete_categories_load(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Category>, FetchError>,
    ) -> LoadOutcome {
        if ticket.kind != FetchKind::Categories || ticket.seq != self.category_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.category_seq,
                "discarding stale category response"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(categories) => {
                self.remote_categories = Some(dedup_categories(categories));
            }
            Err(err) => {
                tracing::warn!(error = %err, "category load failed; deriving from products");
            }
        }
        LoadOutcome::Applied
    }
}

/// Distinct non-empty categories of `products`, in first-seen order.
#[must_use]
pub fn derive_categories(products: &[Product]) -> Vec<Category> {
    dedup_categories(products.iter().filter_map(|p| p.category.clone()))
}

fn dedup_categories(categories: impl IntoIterator<Item = Category>) -> Vec<Category> {
    let mut seen = HashSet::new();
    categories
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty() && seen.insert(c.clone()))
        .collect()
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
