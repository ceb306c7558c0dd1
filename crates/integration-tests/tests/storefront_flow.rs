//! End-to-end tests for the shopping flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront running (cargo run -p himal-storefront)
//!
//! Run with: cargo test -p himal-integration-tests -- --ignored

use reqwest::{Client, StatusCode, redirect::Policy};

/// Base URL for the storefront (configurable via environment).
fn base_url() -> String {
    std::env::var("HIMAL_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A cookie-holding client that follows redirects, like a browser.
fn browser_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A cookie-holding client that does NOT follow redirects, for asserting on
/// redirect targets.
fn raw_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Unique email per test run.
fn fresh_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    format!("{prefix}+{nanos}@example.com")
}

/// Register a fresh account and leave the client logged in.
async fn register(client: &Client, email: &str) {
    let resp = client
        .post(format!("{}/auth/register", base_url()))
        .form(&[
            ("email", email),
            ("full_name", "Flow Test"),
            ("password", "flow-test-password"),
        ])
        .send()
        .await
        .expect("Failed to register");

    assert!(resp.status().is_success() || resp.status().is_redirection());
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health() {
    let resp = reqwest::get(format!("{}/health", base_url()))
        .await
        .expect("Failed to reach server");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_home_page_renders() {
    let resp = reqwest::get(base_url())
        .await
        .expect("Failed to reach server");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("product-grid") || body.contains("No products found"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_cart_survives_across_requests() {
    let client = browser_client();

    // An unknown product ID is accepted; the cart page just skips it.
    let resp = client
        .post(format!("{}/cart/add/999999", base_url()))
        .send()
        .await
        .expect("Failed to add to cart");
    assert!(resp.status().is_success());

    let body = client
        .get(format!("{}/cart", base_url()))
        .send()
        .await
        .expect("Failed to load cart")
        .text()
        .await
        .expect("body");
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_checkout_requires_login() {
    let client = raw_client();

    let resp = client
        .get(format!("{}/checkout", base_url()))
        .send()
        .await
        .expect("Failed to request checkout");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("redirect location");
    assert_eq!(location, "/auth/login");
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_empty_cart_checkout_redirects_home() {
    let client = raw_client();
    register(&client, &fresh_email("empty-cart")).await;

    let resp = client
        .get(format!("{}/checkout", base_url()))
        .send()
        .await
        .expect("Failed to request checkout");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("redirect location");
    assert_eq!(location, "/");
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_checkout_validation_names_missing_fields() {
    let client = browser_client();
    register(&client, &fresh_email("validation")).await;

    // Put something in the cart so validation, not the empty-cart rule,
    // decides the outcome. This assumes at least one seeded product.
    let home = client
        .get(base_url())
        .send()
        .await
        .expect("home")
        .text()
        .await
        .expect("body");
    let Some(id) = extract_first_product_id(&home) else {
        // Nothing in the catalog; nothing to assert against.
        return;
    };

    client
        .post(format!("{}/cart/add/{id}", base_url()))
        .send()
        .await
        .expect("Failed to add to cart");

    let body = client
        .post(format!("{}/checkout", base_url()))
        .form(&[
            ("full_name", ""),
            ("mobile", "9800000000"),
            ("province", ""),
            ("address", "12 Lake Rd"),
        ])
        .send()
        .await
        .expect("Failed to post checkout")
        .text()
        .await
        .expect("body");

    assert!(body.contains("full_name"));
    assert!(body.contains("province"));
    assert!(!body.contains("<li>mobile</li>"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_full_purchase_flow() {
    let client = browser_client();
    register(&client, &fresh_email("purchase")).await;

    let home = client
        .get(base_url())
        .send()
        .await
        .expect("home")
        .text()
        .await
        .expect("body");
    let Some(id) = extract_first_product_id(&home) else {
        return;
    };

    client
        .post(format!("{}/cart/add/{id}", base_url()))
        .send()
        .await
        .expect("Failed to add to cart");

    let resp = client
        .post(format!("{}/checkout", base_url()))
        .form(&[
            ("full_name", "Flow Test"),
            ("mobile", "9800000000"),
            ("province", "Bagmati"),
            ("address", "12 Lake Rd"),
        ])
        .send()
        .await
        .expect("Failed to place order");
    assert!(resp.status().is_success());

    // The order shows up on the account page and the cart is now empty.
    let account = client
        .get(format!("{}/account", base_url()))
        .send()
        .await
        .expect("account")
        .text()
        .await
        .expect("body");
    assert!(account.contains("Pending"));

    let cart = client
        .get(format!("{}/cart", base_url()))
        .send()
        .await
        .expect("cart")
        .text()
        .await
        .expect("body");
    assert!(cart.contains("Your cart is empty"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_admin_dashboard_shows_aggregates() {
    // Needs the seeded admin credentials in the environment.
    let (Ok(email), Ok(password)) = (
        std::env::var("HIMAL_ADMIN_EMAIL"),
        std::env::var("HIMAL_ADMIN_PASSWORD"),
    ) else {
        return;
    };

    let client = browser_client();
    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to log in as admin");
    assert!(resp.status().is_success());

    let body = client
        .get(format!("{}/admin", base_url()))
        .send()
        .await
        .expect("Failed to load dashboard")
        .text()
        .await
        .expect("body");

    // Earnings render even with zero orders (COALESCE keeps the sum at 0).
    assert!(body.contains("Earnings: Rs."));
    assert!(body.contains("Orders:"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_admin_requires_admin_account() {
    let client = raw_client();
    register(&client, &fresh_email("not-admin")).await;

    let resp = client
        .get(format!("{}/admin", base_url()))
        .send()
        .await
        .expect("Failed to request admin");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

/// Pull the first `/products/{id}` link out of a rendered page.
fn extract_first_product_id(body: &str) -> Option<i32> {
    let start = body.find("/products/")? + "/products/".len();
    let digits: String = body[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
