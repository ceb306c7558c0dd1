//! Order status enum.

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a recognized order status.
///
/// The storage layer keeps status as text, but callers only ever see the
/// closed [`OrderStatus`] enum; anything else is rejected at the parse
/// boundary instead of being written through.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid order status: {0:?} (expected Pending or Delivered)")]
pub struct InvalidStatus(pub String);

/// Fulfillment status of a placed order.
///
/// Orders start out `Pending` and are flipped to `Delivered` by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Delivered,
}

impl OrderStatus {
    /// The canonical string stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Delivered" => Ok(Self::Delivered),
            other => Err(InvalidStatus(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_known_statuses() {
        assert_eq!(OrderStatus::from_str("Pending"), Ok(OrderStatus::Pending));
        assert_eq!(
            OrderStatus::from_str("Delivered"),
            Ok(OrderStatus::Delivered)
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(OrderStatus::from_str("Shipped").is_err());
        assert!(OrderStatus::from_str("pending").is_err());
        assert!(OrderStatus::from_str("").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for status in [OrderStatus::Pending, OrderStatus::Delivered] {
            assert_eq!(OrderStatus::from_str(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }
}
