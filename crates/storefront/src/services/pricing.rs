//! Pricing rules.
//!
//! There is exactly one rule: a product with a non-zero discount price is
//! charged the discount price, otherwise the base price. The rule is applied
//! identically wherever a price is shown or charged, so the cart page, the
//! checkout page and the stored order total can never disagree.

use rust_decimal::Decimal;

use crate::models::Product;

/// The price actually charged for a product.
///
/// A present, non-zero discount wins, even above the base price; a zero
/// discount is the no-discount sentinel and falls back to the base price.
#[must_use]
pub fn effective_price(product: &Product) -> Decimal {
    product.sale_price().unwrap_or(product.price)
}

/// One resolved cart line: a product at its effective price.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub product: Product,
    /// The charged price, frozen by [`effective_price`] at resolution time.
    pub unit_price: Decimal,
}

impl LineItem {
    #[must_use]
    pub fn new(product: Product) -> Self {
        let unit_price = effective_price(&product);
        Self {
            product,
            unit_price,
        }
    }
}

/// Price a sequence of products, preserving order and duplicates.
///
/// Returns the line items and their sum. Duplicates each contribute their
/// effective price; quantity is repetition.
#[must_use]
pub fn line_items(products: Vec<Product>) -> (Vec<LineItem>, Decimal) {
    let items: Vec<LineItem> = products.into_iter().map(LineItem::new).collect();
    let total = items.iter().map(|item| item.unit_price).sum();
    (items, total)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use himal_core::ProductId;

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

    #[test]
    fn test_discount_wins_over_base_price() {
        let p = product(1, dec!(500), Some(dec!(400)));
        assert_eq!(effective_price(&p), dec!(400));
    }

    #[test]
    fn test_no_discount_charges_base_price() {
        let p = product(1, dec!(1000), None);
        assert_eq!(effective_price(&p), dec!(1000));
    }

    #[test]
    fn test_zero_discount_falls_back_to_base_price() {
        // Zero is the no-discount sentinel, not a free product.
        let p = product(1, dec!(250), Some(dec!(0)));
        assert_eq!(effective_price(&p), dec!(250));
    }

    #[test]
    fn test_zero_discount_in_total() {
        let a = product(1, dec!(1000), None);
        let b = product(2, dec!(500), Some(dec!(0)));
        let (_, total) = line_items(vec![a, b]);
        assert_eq!(total, dec!(1500));
    }

    #[test]
    fn test_total_counts_duplicates() {
        // A at 1000, B discounted 500 -> 400, B twice in the cart.
        let a = product(1, dec!(1000), None);
        let b = product(2, dec!(500), Some(dec!(400)));
        let (items, total) = line_items(vec![a, b.clone(), b]);
        assert_eq!(items.len(), 3);
        assert_eq!(total, dec!(1800));
    }

    #[test]
    fn test_empty_total_is_zero() {
        let (items, total) = line_items(Vec::new());
        assert!(items.is_empty());
        assert_eq!(total, Decimal::ZERO);
    }
}
