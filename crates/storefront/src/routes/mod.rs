//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (catalog, ?q= search)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/{id}          - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add/{id}          - Add product, redirect back
//! POST /cart/remove/{index}    - Remove entry by position, redirect to cart
//!
//! # Checkout
//! GET  /checkout               - Checkout page (redirects home when cart empty)
//! POST /checkout               - Place order
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Account (requires auth)
//! GET  /account                - Profile + order history
//! POST /account/profile        - Update profile
//! POST /account/password       - Change password
//!
//! # Admin (requires admin)
//! GET  /admin                  - Dashboard (stats, products, orders, settings)
//! POST /admin/products         - Create product (multipart, image upload)
//! POST /admin/products/{id}/delete  - Delete product
//! POST /admin/orders/{id}/status    - Set order status
//! POST /admin/orders/{id}/delete    - Delete order
//! POST /admin/settings         - Save site settings (multipart, promo upload)
//! POST /admin/settings/promo/delete - Remove promo banner
//! POST /admin/payments         - Add payment method (multipart, QR upload)
//! POST /admin/payments/{id}/delete  - Delete payment method
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod page;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add/{id}", post(cart::add))
        .route("/remove/{index}", post(cart::remove))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/profile", post(account::update_profile))
        .route("/password", post(account::change_password))
}

/// Create the admin routes router.
///
/// Every handler takes `RequireAdmin`, so the nest point needs no extra
/// middleware.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/products", post(admin::create_product))
        .route("/products/{id}/delete", post(admin::delete_product))
        .route("/orders/{id}/status", post(admin::set_order_status))
        .route("/orders/{id}/delete", post(admin::delete_order))
        .route("/settings", post(admin::save_settings))
        .route("/settings/promo/delete", post(admin::remove_promo))
        .route("/payments", post(admin::create_payment_method))
        .route("/payments/{id}/delete", post(admin::delete_payment_method))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products/{id}", get(products::show))
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::place))
        .nest("/auth", auth_routes())
        .nest("/account", account_routes())
        .nest("/admin", admin_routes())
}
