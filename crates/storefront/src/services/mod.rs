//! Business logic services.
//!
//! Services sit between the route handlers and the repositories: pricing and
//! cart resolution are pure, checkout owns the commit transaction, auth owns
//! password hashing, uploads own the image directory.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod pricing;
pub mod uploads;
