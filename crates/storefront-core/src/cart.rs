//! In-memory shopping cart.
//!
//! The cart keeps products in insertion order for display and a parallel id
//! set for membership checks. No two entries ever share an id. Every
//! mutation is idempotent: adding a present product or removing an absent id
//! leaves the cart unchanged and reports no event.

use std::collections::HashSet;
use std::fmt;

use rust_decimal::Decimal;

use crate::products::{Product, ProductId};

/// User-visible confirmation of a cart change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    Added { id: ProductId, name: String },
    Removed { id: ProductId, name: String },
}

impl fmt::Display for CartEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartEvent::Added { .. } => write!(f, "Added to cart!"),
            CartEvent::Removed { .. } => write!(f, "Removed from cart"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<Product>,
    ids: HashSet<ProductId>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `product` unless a product with the same id is already present.
    pub fn add_to_cart(&mut self, product: Product) -> Option<CartEvent> {
        if !self.ids.insert(product.id) {
            return None;
        }
        let event = CartEvent::Added {
            id: product.id,
            name: product.name.clone(),
        };
        tracing::debug!(product_id = product.id, "added product to cart");
        self.items.push(product);
        Some(event)
    }

    /// Removes the product with `id` if present.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Option<CartEvent> {
        if !self.ids.remove(&id) {
            return None;
        }
        let idx = self.items.iter().position(|p| p.id == id)?;
        let removed = self.items.remove(idx);
        tracing::debug!(product_id = id, "removed product from cart");
        Some(CartEvent::Removed {
            id,
            name: removed.name,
        })
    }

    #[must_use]
    pub fn is_in_cart(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Cart contents in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(|p| p.price).sum()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn product(id: ProductId) -> Product {
        Product::new(id, format!("Product {id}"), Decimal::new(id * 10, 0))
    }

    fn cart_ids(cart: &Cart) -> Vec<ProductId> {
        cart.items().iter().map(|p| p.id).collect()
    }

    #[test]
    fn add_then_remove_scenario() {
        let mut cart = Cart::new();
        let event = cart.add_to_cart(product(5));
        assert!(matches!(event, Some(CartEvent::Added { id: 5, .. })));
        assert_eq!(cart_ids(&cart), vec![5]);
        assert!(cart.is_in_cart(5));

        let event = cart.remove_from_cart(5);
        assert!(matches!(event, Some(CartEvent::Removed { id: 5, .. })));
        assert!(cart.is_empty());
        assert!(!cart.is_in_cart(5));
    }

    #[test]
    fn duplicate_add_is_silent_noop() {
        let mut cart = Cart::new();
        assert!(cart.add_to_cart(product(1)).is_some());
        assert!(cart.add_to_cart(product(1)).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn removing_absent_id_is_silent_noop() {
        let mut cart = Cart::new();
        cart.add_to_cart(product(1));
        assert!(cart.remove_from_cart(2).is_none());
        assert!(cart.remove_from_cart(1).is_some());
        assert!(cart.remove_from_cart(1).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn preserves_insertion_order() {
        let mut cart = Cart::new();
        for id in [3, 1, 2] {
            cart.add_to_cart(product(id));
        }
        cart.remove_from_cart(1);
        cart.add_to_cart(product(1));
        assert_eq!(cart_ids(&cart), vec![3, 2, 1]);
    }

    #[test]
    fn total_price_sums_entries() {
        let mut cart = Cart::new();
        cart.add_to_cart(product(1));
        cart.add_to_cart(product(2));
        cart.add_to_cart(product(2));
        assert_eq!(cart.total_price(), Decimal::new(30, 0));
    }

    #[test]
    fn events_render_as_notifications() {
        let added = CartEvent::Added {
            id: 1,
            name: "Milk".to_string(),
        };
        let removed = CartEvent::Removed {
            id: 1,
            name: "Milk".to_string(),
        };
        assert_eq!(added.to_string(), "Added to cart!");
        assert_eq!(removed.to_string(), "Removed from cart");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(ProductId),
        Remove(ProductId),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![(0i64..8).prop_map(Op::Add), (0i64..8).prop_map(Op::Remove)]
    }

    proptest! {
        #[test]
        fn ids_stay_unique_and_index_matches(ops in proptest::collection::vec(arb_op(), 0..64)) {
            let mut cart = Cart::new();
            for op in ops {
                match op {
                    Op::Add(id) => { cart.add_to_cart(product(id)); }
                    Op::Remove(id) => { cart.remove_from_cart(id); }
                }
                let ids = cart_ids(&cart);
                let unique: HashSet<_> = ids.iter().copied().collect();
                prop_assert_eq!(unique.len(), ids.len());
                prop_assert_eq!(&unique, &cart.ids);
            }
        }

        #[test]
        fn repeated_calls_are_idempotent(id in 0i64..8, seed in proptest::collection::vec(0i64..8, 0..8)) {
            let mut once = Cart::new();
            let mut twice = Cart::new();
            for s in &seed {
                once.add_to_cart(product(*s));
                twice.add_to_cart(product(*s));
            }

            once.add_to_cart(product(id));
            twice.add_to_cart(product(id));
            twice.add_to_cart(product(id));
            prop_assert_eq!(cart_ids(&once), cart_ids(&twice));

            once.remove_from_cart(id);
            twice.remove_from_cart(id);
            twice.remove_from_cart(id);
            prop_assert_eq!(cart_ids(&once), cart_ids(&twice));
        }
    }
}
