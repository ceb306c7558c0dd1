//! Session cart access and resolution.
//!
//! The cart lives in the session under a single key as a plain array of
//! product IDs. Resolution joins those IDs against the catalog and applies
//! the skip rule: IDs with no matching product vanish from the view without
//! an error, so a deleted product self-heals out of every cart that holds it.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tower_sessions::Session;

use himal_core::{Cart, ProductId};

use crate::models::{Product, session_keys};
use crate::services::pricing::{self, LineItem};

/// Load the cart from the session, defaulting to empty.
///
/// # Errors
///
/// Returns the session store error if the session cannot be read.
pub async fn load(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the cart back to the session.
///
/// # Errors
///
/// Returns the session store error if the session cannot be written.
pub async fn store(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// A cart joined against the catalog.
#[derive(Debug, Clone)]
pub struct CartView {
    /// Resolved lines in cart order, skipped entries absent.
    pub items: Vec<LineItem>,
    /// Sum of effective prices over `items`.
    pub total: Decimal,
    /// Cart entries that had no matching product.
    pub skipped: Vec<ProductId>,
}

impl CartView {
    /// Whether resolution produced no chargeable lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Resolve cart entries against already-fetched products.
///
/// Pure: callers fetch the product map themselves (checkout does so inside
/// its transaction). Cart order and duplicates are preserved; unknown IDs go
/// to `skipped` and contribute nothing to the total.
#[must_use]
pub fn resolve(cart: &Cart, products: &HashMap<ProductId, Product>) -> CartView {
    let mut resolved = Vec::with_capacity(cart.len());
    let mut skipped = Vec::new();

    for &id in cart.entries() {
        match products.get(&id) {
            Some(product) => resolved.push(product.clone()),
            None => skipped.push(id),
        }
    }

    let (items, total) = pricing::line_items(resolved);
    CartView {
        items,
        total,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use super::*;

    fn product(id: i32, price: Decimal, discount: Option<Decimal>) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price,
            discount_price: discount,
            description: String::new(),
            image_url: None,
            created_at: Utc::now(),
        }
    }

    fn catalog(products: Vec<Product>) -> HashMap<ProductId, Product> {
        products.into_iter().map(|p| (p.id, p)).collect()
    }

    #[test]
    fn test_resolve_preserves_order_and_duplicates() {
        let cart: Cart = [2, 1, 2].iter().copied().map(ProductId::new).collect();
        let products = catalog(vec![
            product(1, dec!(1000), None),
            product(2, dec!(500), Some(dec!(400))),
        ]);

        let view = resolve(&cart, &products);
        let ids: Vec<i32> = view
            .items
            .iter()
            .map(|item| item.product.id.as_i32())
            .collect();
        assert_eq!(ids, vec![2, 1, 2]);
        assert_eq!(view.total, dec!(1800));
        assert!(view.skipped.is_empty());
    }

    #[test]
    fn test_resolve_skips_missing_products() {
        let cart: Cart = [1, 99, 2].iter().copied().map(ProductId::new).collect();
        let products = catalog(vec![
            product(1, dec!(300), None),
            product(2, dec!(200), None),
        ]);

        let view = resolve(&cart, &products);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.total, dec!(500));
        assert_eq!(view.skipped, vec![ProductId::new(99)]);
    }

    #[test]
    fn test_resolve_all_missing_is_empty() {
        let cart: Cart = [7, 8].iter().copied().map(ProductId::new).collect();
        let view = resolve(&cart, &HashMap::new());
        assert!(view.is_empty());
        assert_eq!(view.total, Decimal::ZERO);
        assert_eq!(view.skipped.len(), 2);
    }

    #[test]
    fn test_resolve_empty_cart() {
        let view = resolve(&Cart::new(), &HashMap::new());
        assert!(view.is_empty());
        assert!(view.skipped.is_empty());
    }
}
