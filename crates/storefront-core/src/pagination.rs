//! Fixed-size page slicing for the filtered product list.
//!
//! Pages are 1-based. There is always at least one page, even for an empty
//! list, so "Page 1 of 1" is the smallest thing the view can show.

use crate::products::Product;

/// Products per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// One page of a product list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a> {
    pub items: &'a [Product],
    /// The page that was requested (not clamped).
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl Page<'_> {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages needed for `count` items; never less than 1.
#[must_use]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Slices `products` into the 1-based `page` of size `page_size`.
///
/// A page past the end yields an empty slice rather than an error; page 0 is
/// read as page 1. A `page_size` of 0 is read as 1.
#[must_use]
pub fn paginate(products: &[Product], page: usize, page_size: usize) -> Page<'_> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(products.len());
    let end = start.saturating_add(page_size).min(products.len());

    Page {
        items: &products[start..end],
        page,
        total_pages: total_pages(products.len(), page_size),
        total_items: products.len(),
    }
}

/// Current page cursor with the configured page size.
///
/// Keeps `1 <= current_page`; the upper bound depends on the filtered list and
/// is enforced by [`PaginationState::next`] and [`PaginationState::clamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: usize,
    page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Advances one page. Returns `false` (and does nothing) on the last page.
    pub fn next(&mut self, total_pages: usize) -> bool {
        if self.current_page < total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page. Returns `false` (and does nothing) on page 1.
    pub fn previous(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Pulls the cursor back inside `[1, total_pages]`.
    pub fn clamp(&mut self, total_pages: usize) {
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
    }

    /// Jumps to `page`, clamped to `[1, total_pages]`.
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.current_page = page;
        self.clamp(total_pages);
    }

    #[must_use]
    pub fn slice<'a>(&self, products: &'a [Product]) -> Page<'a> {
        paginate(products, self.current_page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    use super::*;

    fn products(n: usize) -> Vec<Product> {
        (0..n)
            .map(|i| Product::new(i64::try_from(i).unwrap(), format!("P{i}"), Decimal::ONE))
            .collect()
    }

    #[test]
    fn second_page_of_ten_with_size_six() {
        let items = products(10);
        let page = paginate(&items, 2, 6);
        assert_eq!(page.items, &items[6..10]);
        assert_eq!(page.items.len(), 4);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn next_on_last_page_is_noop() {
        let items = products(10);
        let mut state = PaginationState::new(6);
        let total = paginate(&items, 1, 6).total_pages;
        assert!(state.next(total));
        assert_eq!(state.current_page(), 2);
        assert!(!state.next(total));
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn previous_on_first_page_is_noop() {
        let mut state = PaginationState::new(6);
        assert!(!state.previous());
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn empty_list_has_one_page() {
        let page = paginate(&[], 1, 6);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn page_beyond_end_is_empty_not_error() {
        let items = products(3);
        let page = paginate(&items, 5, 6);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 5);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn zero_page_and_zero_size_are_coerced() {
        let items = products(3);
        let page = paginate(&items, 0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(PaginationState::new(0).page_size(), 1);
    }

    #[test]
    fn clamp_and_reset() {
        let mut state = PaginationState::new(6);
        state.go_to(9, 3);
        assert_eq!(state.current_page(), 3);
        state.clamp(1);
        assert_eq!(state.current_page(), 1);
        state.go_to(2, 4);
        state.reset();
        assert_eq!(state.current_page(), 1);
    }

    proptest! {
        #[test]
        fn pages_partition_the_input(n in 0usize..60, page_size in 1usize..10) {
            let items = products(n);
            let total = total_pages(n, page_size);
            let mut rebuilt = Vec::new();
            for page in 1..=total {
                let slice = paginate(&items, page, page_size);
                prop_assert!(slice.items.len() <= page_size);
                prop_assert_eq!(slice.total_pages, total);
                rebuilt.extend_from_slice(slice.items);
            }
            prop_assert_eq!(rebuilt, items);
        }
    }
}
