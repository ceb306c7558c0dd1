//! Payment method display records.

use himal_core::PaymentMethodId;

/// A manual payment option shown on the checkout page.
///
/// These are static display data (wallet name, account number, optional QR
/// image) - the store records orders but does not process transactions.
#[derive(Debug, Clone)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    pub method_name: String,
    pub account_number: String,
    pub qr_image: Option<String>,
}
