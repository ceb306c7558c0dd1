//! Database access for the storefront `PostgreSQL` instance.
//!
//! ## Tables
//!
//! - `users` - store accounts (argon2 password hashes)
//! - `products` - the catalog
//! - `orders` - checkout snapshots
//! - `settings` - site appearance key/value pairs
//! - `payment_methods` - manual payment display records
//! - `tower_sessions` - created by the session store's own migration
//!
//! # Migrations
//!
//! Migrations live in `crates/storefront/migrations/` and run via
//! `himal-cli migrate` (or [`run_migrations`] at startup).
//!
//! Queries are runtime-bound (`sqlx::query_as` + `FromRow` row structs);
//! repositories borrow the pool and map rows into the domain models in
//! [`crate::models`].

pub mod orders;
pub mod payment_methods;
pub mod products;
pub mod settings;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Errors from the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The underlying query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored value could not be mapped into its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The acquire timeout also bounds how long a checkout can sit waiting for
/// a connection when the backing store stalls.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the storefront schema migrations.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await
}
