//! Catalog product types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use himal_core::ProductId;

/// A catalog product.
///
/// Immutable except through explicit admin create/delete. `discount_price`
/// is meaningful when it is below `price`, but the store does not enforce
/// that ordering at write time; zero is the no-discount sentinel and any
/// other stored value passes through uninterpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Base price in rupees.
    pub price: Decimal,
    /// Optional sale price; when present it is the price charged.
    pub discount_price: Option<Decimal>,
    /// Free-text description.
    pub description: String,
    /// URL of the product image, if one was uploaded.
    pub image_url: Option<String>,
    /// When the product was created (catalog listings are newest first).
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// The sale price, if the product is actually discounted.
    ///
    /// A stored discount of zero means "no discount", not a free product.
    #[must_use]
    pub fn sale_price(&self) -> Option<Decimal> {
        self.discount_price.filter(|discount| !discount.is_zero())
    }
}

/// Data for creating a product via the admin console.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub description: String,
    pub image_url: Option<String>,
}
