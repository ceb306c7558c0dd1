//! User domain types.

use chrono::{DateTime, Utc};

use himal_core::{Email, UserId};

/// A store account.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login identifier.
    pub email: Email,
    /// Display name; filled in at registration or by checkout.
    pub full_name: Option<String>,
    /// Contact number; updated as a checkout side effect.
    pub mobile: Option<String>,
    /// Home province; updated as a checkout side effect.
    pub province: Option<String>,
    /// Whether this account can use the admin console.
    pub is_admin: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
