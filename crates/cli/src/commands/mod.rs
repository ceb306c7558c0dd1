//! CLI command implementations.

pub mod admin;
pub mod migrate;

/// Read the database URL, preferring `HIMAL_DATABASE_URL` and falling back
/// to `DATABASE_URL`.
pub(crate) fn database_url() -> Option<String> {
    std::env::var("HIMAL_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}
