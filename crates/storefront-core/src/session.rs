//! Browsing session: the single owner of catalog, cart, filter and page state.
//!
//! The view layer feeds user intents into [`Storefront::dispatch`] and gets
//! back a list of [`Effect`]s to carry out: notifications to show and remote
//! fetches to run. Fetch results come back through
//! [`Storefront::complete_products`] and [`Storefront::complete_categories`].
//! Nothing here performs I/O.

use crate::cart::{Cart, CartEvent};
use crate::catalog::{CatalogStore, FetchTicket, LoadOutcome, LoadState};
use crate::filter::FilterState;
use crate::pagination::{total_pages, Page, PaginationState};
use crate::products::{Category, Product, ProductId};
use crate::FetchError;

/// Where the catalog comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogMode {
    /// Fixed dataset installed up front; never refetched.
    Static,
    /// Loaded from the catalog API through fetch effects.
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Catalog,
    Detail(ProductId),
    Cart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Updates the search box without filtering yet.
    EditSearch(String),
    SubmitSearch,
    /// Empty string selects all categories.
    SelectCategory(String),
    NextPage,
    PreviousPage,
    SelectProduct(ProductId),
    Deselect,
    AddToCart(ProductId),
    RemoveFromCart(ProductId),
    ShowCart,
    ShowCatalog,
    Reload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(CartEvent),
    FetchProducts {
        ticket: FetchTicket,
        category: Option<Category>,
    },
    FetchCategories {
        ticket: FetchTicket,
    },
}

#[derive(Debug)]
pub struct Storefront {
    mode: CatalogMode,
    catalog: CatalogStore,
    cart: Cart,
    search_input: String,
    filter: FilterState,
    pagination: PaginationState,
    screen: Screen,
    filtered: Vec<Product>,
}

impl Storefront {
    /// A session over a fixed product list.
    #[must_use]
    pub fn with_static_catalog(products: Vec<Product>, page_size: usize) -> Self {
        Self::build(
            CatalogMode::Static,
            CatalogStore::from_products(products),
            page_size,
        )
    }

    /// A session whose catalog is filled by fetch effects; call
    /// [`Self::start`] to obtain the initial ones.
    #[must_use]
    pub fn remote(page_size: usize) -> Self {
        Self::build(CatalogMode::Remote, CatalogStore::new(), page_size)
    }

    fn build(mode: CatalogMode, catalog: CatalogStore, page_size: usize) -> Self {
        let mut session = Self {
            mode,
            catalog,
            cart: Cart::new(),
            search_input: String::new(),
            filter: FilterState::default(),
            pagination: PaginationState::new(page_size),
            screen: Screen::Catalog,
            filtered: Vec::new(),
        };
        session.refilter();
        session
    }

    /// Effects needed before the first render.
    pub fn start(&mut self) -> Vec<Effect> {
        match self.mode {
            CatalogMode::Static => Vec::new(),
            CatalogMode::Remote => self.reload_effects(),
        }
    }

    pub fn dispatch(&mut self, intent: Intent) -> Vec<Effect> {
        tracing::debug!(?intent, "dispatching intent");
        match intent {
            Intent::EditSearch(term) => {
                self.search_input = term;
                Vec::new()
            }
            Intent::SubmitSearch => {
                self.filter.search_term.clone_from(&self.search_input);
                self.on_filter_changed();
                Vec::new()
            }
            Intent::SelectCategory(category) => {
                self.filter.category = category.trim().to_string();
                self.on_filter_changed();
                match self.mode {
                    CatalogMode::Static => Vec::new(),
                    CatalogMode::Remote => vec![self.fetch_products_effect()],
                }
            }
            Intent::NextPage => {
                let total = self.total_pages();
                self.pagination.next(total);
                Vec::new()
            }
            Intent::PreviousPage => {
                self.pagination.previous();
                Vec::new()
            }
            Intent::SelectProduct(id) => {
                if self.catalog.find(id).is_some() {
                    self.screen = Screen::Detail(id);
                } else {
                    tracing::debug!(product_id = id, "ignoring selection of unknown product");
                }
                Vec::new()
            }
            Intent::Deselect | Intent::ShowCatalog => {
                self.screen = Screen::Catalog;
                Vec::new()
            }
            Intent::ShowCart => {
                self.screen = Screen::Cart;
                Vec::new()
            }
            Intent::AddToCart(id) => {
                let Some(product) = self.catalog.find(id).cloned() else {
                    tracing::debug!(product_id = id, "cannot add unknown product to cart");
                    return Vec::new();
                };
                self.cart
                    .add_to_cart(product)
                    .map(Effect::Notify)
                    .into_iter()
                    .collect()
            }
            Intent::RemoveFromCart(id) => self
                .cart
                .remove_from_cart(id)
                .map(Effect::Notify)
                .into_iter()
                .collect(),
            Intent::Reload => match self.mode {
                CatalogMode::Static => Vec::new(),
                CatalogMode::Remote => self.reload_effects(),
            },
        }
    }

    /// Feeds back the result of an [`Effect::FetchProducts`].
    pub fn complete_products(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Product>, FetchError>,
    ) -> LoadOutcome {
        let outcome = self.catalog.complete_products_load(ticket, result);
        if outcome == LoadOutcome::Applied {
            self.refilter();
            let total = self.total_pages();
            self.pagination.clamp(total);
            if let Screen::Detail(id) = self.screen {
                if self.catalog.find(id).is_none() {
                    self.screen = Screen::Catalog;
                }
            }
        }
        outcome
    }

    /// Feeds back the result of an [`Effect::FetchCategories`].
    pub fn complete_categories(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Category>, FetchError>,
    ) -> LoadOutcome {
        self.catalog.complete_categories_load(ticket, result)
    }

    /// The current page of filtered products, or the load error to show in
    /// its place.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] of the last product load if it failed.
    pub fn visible_page(&self) -> Result<Page<'_>, FetchError> {
        if let LoadState::Failed(err) = self.catalog.state() {
            return Err(err.clone());
        }
        Ok(self.pagination.slice(&self.filtered))
    }

    /// The product shown on the detail screen, if that screen is active.
    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        match self.screen {
            Screen::Detail(id) => self.catalog.find(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> CatalogMode {
        self.mode
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    #[must_use]
    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.catalog.categories()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.catalog.state(), LoadState::Loading)
    }

    fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.pagination.page_size())
    }

    fn on_filter_changed(&mut self) {
        self.refilter();
        self.pagination.reset();
        self.screen = Screen::Catalog;
    }

    fn refilter(&mut self) {
        self.filtered = self.filter.apply(self.catalog.products());
    }

    fn fetch_products_effect(&mut self) -> Effect {
        let category = Some(self.filter.category.clone()).filter(|c| !c.is_empty());
        let ticket = if category.is_some() {
            self.catalog.begin_scoped_products_load()
        } else {
            self.catalog.begin_products_load()
        };
        Effect::FetchProducts { ticket, category }
    }

    fn reload_effects(&mut self) -> Vec<Effect> {
        let categories = Effect::FetchCategories {
            ticket: self.catalog.begin_categories_load(),
        };
        vec![categories, self.fetch_products_effect()]
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
