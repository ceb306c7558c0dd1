//! Order types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use himal_core::{OrderId, OrderStatus, UserId};

/// A persisted order.
///
/// Everything except `status` is a frozen snapshot taken at checkout time:
/// later catalog price changes or user profile edits do not touch it.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The user who placed the order.
    pub user_id: UserId,
    /// Recipient name as submitted at checkout.
    pub full_name: String,
    /// Contact number as submitted at checkout.
    pub mobile: String,
    /// Delivery address ("street, province") as submitted at checkout.
    pub address: String,
    /// Total charged, frozen at checkout. Never recomputed.
    pub total_amount: Decimal,
    /// Fulfillment status, the only admin-mutable field.
    pub status: OrderStatus,
    /// Comma-joined product names in cart order. Lossy by design: it keeps
    /// neither identifiers nor distinct quantities.
    pub items_summary: String,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// Shipping details collected by the checkout form.
#[derive(Debug, Clone)]
pub struct ShippingInfo {
    pub full_name: String,
    pub mobile: String,
    pub province: String,
    pub address: String,
}

impl ShippingInfo {
    /// The single address line stored on the order.
    #[must_use]
    pub fn address_line(&self) -> String {
        format!("{}, {}", self.address, self.province)
    }
}

/// Data for inserting an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub full_name: String,
    pub mobile: String,
    pub address: String,
    pub total_amount: Decimal,
    pub items_summary: String,
}

/// Aggregate figures over all orders, shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderStats {
    /// Number of orders.
    pub count: i64,
    /// Sum of `total_amount` across all orders; zero when there are none.
    pub total_earnings: Decimal,
}
