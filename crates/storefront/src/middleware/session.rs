//! Session middleware configuration.
//!
//! Sessions live in `PostgreSQL` via tower-sessions and carry exactly two
//! values: the logged-in user snapshot and the shopping cart. Expiry is
//! sliding, so an active shopper's cart never times out under them.

use sqlx::PgPool;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "himal_session";

/// Sliding inactivity window before a session (and its cart) expires.
const SESSION_IDLE_EXPIRY: Duration = Duration::days(7);

/// Create the session layer with the `PostgreSQL` store.
///
/// The store's own migration (the `tower_sessions` table) is run separately
/// at startup. The Secure cookie flag follows the configured base URL
/// scheme so local plain-HTTP development still gets a cookie.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> SessionManagerLayer<PostgresStore> {
    let store = PostgresStore::new(pool.clone());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(SESSION_IDLE_EXPIRY))
        .with_secure(config.base_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
