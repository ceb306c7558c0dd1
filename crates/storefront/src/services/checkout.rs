//! Checkout: turning a cart into a persisted order.
//!
//! The workflow is: validate shipping fields, resolve the cart inside a
//! transaction, freeze the snapshot (name, mobile, "address, province",
//! total, comma-joined item names), insert the order and update the user's
//! profile, then commit. The caller clears the session cart only after this
//! returns `Ok` - a failed checkout leaves the cart intact.

use sqlx::PgPool;
use tracing::warn;

use himal_core::{Cart, UserId};

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::db::users::UserRepository;
use crate::models::{NewOrder, Order, ShippingInfo};
use crate::services::cart as cart_service;

/// Errors from placing an order.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// The cart resolved to no purchasable items.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more required shipping fields were blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Repository failure; the transaction rolled back.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Checkout form fields as submitted, before validation.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub full_name: String,
    pub mobile: String,
    pub province: String,
    pub address: String,
}

impl CheckoutForm {
    /// Validate that every required field is non-blank after trimming.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingFields` naming every blank field.
    pub fn validate(&self) -> Result<ShippingInfo, CheckoutError> {
        let mut missing = Vec::new();

        let full_name = self.full_name.trim();
        let mobile = self.mobile.trim();
        let province = self.province.trim();
        let address = self.address.trim();

        if full_name.is_empty() {
            missing.push("full_name");
        }
        if mobile.is_empty() {
            missing.push("mobile");
        }
        if province.is_empty() {
            missing.push("province");
        }
        if address.is_empty() {
            missing.push("address");
        }

        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(missing));
        }

        Ok(ShippingInfo {
            full_name: full_name.to_owned(),
            mobile: mobile.to_owned(),
            province: province.to_owned(),
            address: address.to_owned(),
        })
    }
}

/// Place an order from the given cart.
///
/// Validation runs first and has no side effects. The cart is resolved
/// inside the transaction so the prices charged are the prices read; the
/// order insert and the profile update commit together or not at all.
/// Entries whose product no longer exists are skipped and logged.
///
/// # Errors
///
/// Returns `CheckoutError::MissingFields` if shipping fields are blank,
/// `CheckoutError::EmptyCart` if nothing resolved, or
/// `CheckoutError::Repository` if the database fails (nothing persisted).
pub async fn place_order(
    pool: &PgPool,
    user_id: UserId,
    cart: &Cart,
    form: &CheckoutForm,
) -> Result<Order, CheckoutError> {
    let shipping = form.validate()?;

    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut tx = pool.begin().await.map_err(RepositoryError::from)?;

    let products = ProductRepository::find_by_ids(&mut *tx, cart.entries()).await?;
    let view = cart_service::resolve(cart, &products);

    if !view.skipped.is_empty() {
        warn!(
            skipped = ?view.skipped,
            "cart entries no longer in catalog, skipped at checkout"
        );
    }

    if view.is_empty() {
        // Every entry resolved to nothing; there is no order to place.
        tx.rollback().await.map_err(RepositoryError::from)?;
        return Err(CheckoutError::EmptyCart);
    }

    let items_summary = view
        .items
        .iter()
        .map(|item| item.product.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let order = OrderRepository::create(
        &mut *tx,
        NewOrder {
            user_id,
            full_name: shipping.full_name.clone(),
            mobile: shipping.mobile.clone(),
            address: shipping.address_line(),
            total_amount: view.total,
            items_summary,
        },
    )
    .await?;

    UserRepository::update_profile(
        &mut *tx,
        user_id,
        &shipping.full_name,
        &shipping.mobile,
        &shipping.province,
    )
    .await?;

    tx.commit().await.map_err(RepositoryError::from)?;

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(full_name: &str, mobile: &str, province: &str, address: &str) -> CheckoutForm {
        CheckoutForm {
            full_name: full_name.to_owned(),
            mobile: mobile.to_owned(),
            province: province.to_owned(),
            address: address.to_owned(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        let shipping = form("Asha Rai", "9800000000", "Bagmati", "12 Lake Rd")
            .validate()
            .expect("valid form");
        assert_eq!(shipping.address_line(), "12 Lake Rd, Bagmati");
    }

    #[test]
    fn test_validate_trims_fields() {
        let shipping = form("  Asha Rai ", " 9800000000", "Bagmati ", " 12 Lake Rd ")
            .validate()
            .expect("valid form");
        assert_eq!(shipping.full_name, "Asha Rai");
        assert_eq!(shipping.address_line(), "12 Lake Rd, Bagmati");
    }

    #[test]
    fn test_validate_names_every_blank_field() {
        let err = form("", "980", "", "   ").validate().unwrap_err();
        match err {
            CheckoutError::MissingFields(fields) => {
                assert_eq!(fields, vec!["full_name", "province", "address"]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_whitespace_only_is_blank() {
        let err = form("  ", "  ", "  ", "  ").validate().unwrap_err();
        match err {
            CheckoutError::MissingFields(fields) => assert_eq!(fields.len(), 4),
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }
}
