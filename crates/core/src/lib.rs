//! Himal Core - Shared types library.
//!
//! This crate provides common types used across all Himal Store components:
//! - `storefront` - Customer-facing site with the embedded admin console
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure values - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and order
//!   statuses
//! - [`cart`] - The session-resident shopping cart value

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::Cart;
pub use types::*;
