//! Domain models for the storefront.
//!
//! These types represent validated domain objects separate from database
//! row types; the `db` module maps rows into them.

pub mod order;
pub mod payment;
pub mod product;
pub mod session;
pub mod settings;
pub mod user;

pub use order::{NewOrder, Order, OrderStats, ShippingInfo};
pub use payment::PaymentMethod;
pub use product::{NewProduct, Product};
pub use session::{CurrentUser, session_keys};
pub use settings::{PROVINCES, SiteSettings, Theme};
pub use user::User;
