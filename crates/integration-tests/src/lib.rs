//! Integration tests for Himal Store.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p himal-cli -- migrate
//!
//! # Start the storefront
//! cargo run -p himal-storefront
//!
//! # Run integration tests
//! cargo test -p himal-integration-tests -- --ignored
//! ```
//!
//! The tests in `tests/` drive the running storefront over HTTP with a
//! cookie-holding client, the same way a browser session would.
