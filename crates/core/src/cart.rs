//! The session-resident shopping cart.
//!
//! A cart is nothing more than an ordered list of product IDs scoped to one
//! session. Adding the same product twice yields two entries - quantity is
//! implicit via repetition, exactly as the storefront renders it. The cart
//! never talks to the catalog: entries are appended unconditionally and
//! resolved against the catalog only at render or checkout time, where
//! identifiers that no longer exist are silently dropped.

use serde::{Deserialize, Serialize};

use crate::ProductId;

/// An ordered sequence of product identifiers held in session state.
///
/// Serializes transparently as a JSON array so it can live in the session
/// store unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<ProductId>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a product to the cart.
    ///
    /// No existence check is performed here; a product deleted from the
    /// catalog after this call is skipped when the cart is resolved.
    pub fn add(&mut self, product_id: ProductId) {
        self.entries.push(product_id);
    }

    /// Remove the entry at `index`, if it is in bounds.
    ///
    /// Out-of-range indices are a no-op rather than an error: the index
    /// comes from a rendered page that may be stale by the time the removal
    /// request arrives (another tab already shrank the cart).
    ///
    /// Returns the removed entry, or `None` if the index was stale.
    pub fn remove_at(&mut self, index: usize) -> Option<ProductId> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Empty the cart. Invoked only after a successful checkout commit.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The product identifiers in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ProductId] {
        &self.entries
    }

    /// Number of entries (duplicates counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ProductId> for Cart {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_of(ids: &[i32]) -> Cart {
        ids.iter().copied().map(ProductId::new).collect()
    }

    #[test]
    fn test_add_permits_duplicates() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1));
        cart.add(ProductId::new(2));
        cart.add(ProductId::new(2));
        assert_eq!(cart.len(), 3);
        assert_eq!(
            cart.entries(),
            &[ProductId::new(1), ProductId::new(2), ProductId::new(2)]
        );
    }

    #[test]
    fn test_remove_at_in_bounds() {
        let mut cart = cart_of(&[10, 20, 30]);
        assert_eq!(cart.remove_at(1), Some(ProductId::new(20)));
        assert_eq!(cart.entries(), &[ProductId::new(10), ProductId::new(30)]);
    }

    #[test]
    fn test_remove_at_stale_index_is_noop() {
        let mut cart = cart_of(&[10, 20]);
        assert_eq!(cart.remove_at(2), None);
        assert_eq!(cart.remove_at(usize::MAX), None);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_remove_from_empty_cart() {
        let mut cart = Cart::new();
        assert_eq!(cart.remove_at(0), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = cart_of(&[1, 2, 3]);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_serde_is_a_plain_array() {
        let cart = cart_of(&[5, 7]);
        let json = serde_json::to_string(&cart).expect("serialize");
        assert_eq!(json, "[5,7]");
        let back: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cart);
    }
}
