//! Plain-text rendering of storefront screens.
//!
//! Each view is a small `Display` wrapper, so output can be asserted in tests
//! via `to_string()` and printed directly by the shell.

use std::fmt;

use storefront_core::{Cart, Page, Product, Screen, Storefront};

pub(crate) struct ProductCard<'a> {
    pub(crate) product: &'a Product,
    pub(crate) in_cart: bool,
}

impl fmt::Display for ProductCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.product;
        let action = if self.in_cart {
            "Remove from Cart"
        } else {
            "Add to Cart"
        };
        writeln!(f, "[{}] {}", p.id, p.name)?;
        writeln!(f, "  Description: {}", p.description_or_default())?;
        writeln!(f, "  Price: ₹ {}", p.price)?;
        writeln!(f, "  Manufacture date: {}", p.manufacture_date_or_na())?;
        writeln!(f, "  Used by: {}", p.expiry_date_or_na())?;
        writeln!(f, "  Weight: {}", p.weight_or_na())?;
        writeln!(f, "  Category: {}", p.category_or_na())?;
        writeln!(f, "  ({action})")
    }
}

pub(crate) struct ProductDetail<'a> {
    pub(crate) product: &'a Product,
    pub(crate) in_cart: bool,
}

impl fmt::Display for ProductDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.product;
        let verb = if self.in_cart { "remove" } else { "add" };
        writeln!(f, "← back to products")?;
        writeln!(f, "== {} ==", p.name)?;
        writeln!(f, "Description: {}", p.description_or_default())?;
        writeln!(f, "Price: ₹ {}", p.price)?;
        writeln!(f, "Manufacture Date: {}", p.manufacture_date_or_na())?;
        writeln!(f, "Expiry Date: {}", p.expiry_date_or_na())?;
        match p.weight_kg {
            Some(_) => writeln!(f, "Weight: {} KG", p.weight_or_na())?,
            None => writeln!(f, "Weight: N/A")?,
        }
        writeln!(f, "Category: {}", p.category_or_na())?;
        writeln!(f, "> {verb} {}", p.id)
    }
}

/// One line: "< prev  Page N of M  next >", arrows only where a move is possible.
pub(crate) struct Pagination<'a, 'p>(pub(crate) &'a Page<'p>);

impl fmt::Display for Pagination<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.0;
        if page.has_previous() {
            write!(f, "< prev  ")?;
        }
        write!(f, "Page {} of {}", page.page, page.total_pages)?;
        if page.has_next() {
            write!(f, "  next >")?;
        }
        Ok(())
    }
}

pub(crate) struct Categories<'a> {
    pub(crate) categories: &'a [String],
    pub(crate) selected: &'a str,
}

impl fmt::Display for Categories<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = |on: bool| if on { "*" } else { " " };
        writeln!(f, "{} All Categories", marker(self.selected.is_empty()))?;
        for category in self.categories {
            writeln!(f, "{} {category}", marker(category == self.selected))?;
        }
        Ok(())
    }
}

pub(crate) struct Catalog<'a>(pub(crate) &'a Storefront);

impl fmt::Display for Catalog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        let filter = session.filter();
        let category = if filter.category.is_empty() {
            "All Categories"
        } else {
            filter.category.as_str()
        };
        writeln!(
            f,
            "Product Store | search: \"{}\" | category: {category} | cart: {} item(s)",
            filter.search_term,
            session.cart().len()
        )?;

        if session.is_loading() {
            return writeln!(f, "Loading products...");
        }

        match session.visible_page() {
            Err(err) => writeln!(f, "Error: {err}"),
            Ok(page) => {
                if page.items.is_empty() {
                    writeln!(f, "No products found.")?;
                }
                for product in page.items {
                    let in_cart = session.cart().is_in_cart(product.id);
                    write!(f, "{}", ProductCard { product, in_cart })?;
                }
                writeln!(f, "{}", Pagination(&page))
            }
        }
    }
}

pub(crate) struct CartView<'a>(pub(crate) &'a Cart);

impl fmt::Display for CartView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cart = self.0;
        writeln!(f, "Your Shopping Cart")?;
        if cart.is_empty() {
            return writeln!(f, "Your cart is empty.");
        }
        for product in cart.items() {
            write!(f, "{}", ProductCard { product, in_cart: true })?;
        }
        writeln!(f, "Total: ₹ {}", cart.total_price())
    }
}

/// Whichever screen the session is on.
pub(crate) struct CurrentScreen<'a>(pub(crate) &'a Storefront);

impl fmt::Display for CurrentScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        match session.screen() {
            Screen::Catalog => write!(f, "{}", Catalog(session)),
            Screen::Cart => write!(f, "{}", CartView(session.cart())),
            Screen::Detail(_) => match session.selected_product() {
                Some(product) => {
                    let in_cart = session.cart().is_in_cart(product.id);
                    write!(f, "{}", ProductDetail { product, in_cart })
                }
                None => write!(f, "{}", Catalog(session)),
            },
        }
    }
}
