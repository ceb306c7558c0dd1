//! Admin console.
//!
//! A single dashboard page plus POST actions. Every handler takes
//! [`RequireAdmin`]; there is no separate admin binary or port.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Multipart, Path, State},
    response::Redirect,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, instrument};

use himal_core::{OrderId, OrderStatus, PaymentMethodId, ProductId};

use crate::db::orders::OrderRepository;
use crate::db::payment_methods::PaymentMethodRepository;
use crate::db::products::ProductRepository;
use crate::db::settings::SettingsRepository;
use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{
    NewProduct, Order, OrderStats, PaymentMethod, Product, SiteSettings, Theme, settings::THEMES,
};
use crate::routes::page::PageContext;
use crate::services::uploads;
use crate::state::AppState;

/// Dashboard template: stats, catalog, orders, settings and payment methods
/// on one page.
#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub user_count: i64,
    pub order_stats: OrderStats,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub payment_methods: Vec<PaymentMethod>,
    pub themes: &'static [Theme],
    pub statuses: &'static [OrderStatus],
}

const STATUSES: &[OrderStatus] = &[OrderStatus::Pending, OrderStatus::Delivered];

/// Display the dashboard.
#[instrument(skip(state, session, _admin))]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<DashboardTemplate> {
    let pool = state.pool();

    let user_count = UserRepository::new(pool).count().await?;
    let order_stats = OrderRepository::new(pool).aggregate().await?;
    let products = ProductRepository::new(pool).search(None).await?;
    let orders = OrderRepository::new(pool).list_all().await?;
    let payment_methods = PaymentMethodRepository::new(pool).list().await?;

    let ctx = PageContext::load(&state, &session).await?;
    Ok(DashboardTemplate {
        ctx,
        user_count,
        order_stats,
        products,
        orders,
        payment_methods,
        themes: THEMES,
        statuses: STATUSES,
    })
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Default)]
struct ProductUpload {
    name: String,
    price: Option<Decimal>,
    discount_price: Option<Decimal>,
    description: String,
    image_url: Option<String>,
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|_| AppError::BadRequest(format!("invalid {field}: {value:?}")))
}

/// Create a product from a multipart form with an optional image.
#[instrument(skip(state, _admin, multipart))]
pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    mut multipart: Multipart,
) -> Result<Redirect> {
    let mut upload = ProductUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match name.as_str() {
            "name" => {
                upload.name = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "price" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                upload.price = Some(parse_decimal("price", &text)?);
            }
            "discount_price" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let text = text.trim().to_owned();
                if !text.is_empty() {
                    upload.discount_price = Some(parse_decimal("discount_price", &text)?);
                }
            }
            "description" => {
                upload.description = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                upload.image_url =
                    uploads::store_image(&state.config().upload_dir, &file_name, &data).await?;
            }
            _ => {}
        }
    }

    let name = upload.name.trim().to_owned();
    if name.is_empty() {
        return Err(AppError::BadRequest("product name is required".to_owned()));
    }
    let price = upload
        .price
        .ok_or_else(|| AppError::BadRequest("price is required".to_owned()))?;

    let product = ProductRepository::new(state.pool())
        .create(NewProduct {
            name,
            price,
            discount_price: upload.discount_price,
            description: upload.description,
            image_url: upload.image_url,
        })
        .await?;

    info!(product_id = %product.id, "Product created");
    Ok(Redirect::to("/admin"))
}

/// Delete a product. Existing carts and orders keep working: carts skip the
/// missing ID, orders only ever stored a text snapshot.
#[instrument(skip(state, _admin))]
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    info!(product_id = id, "Product deleted");
    Ok(Redirect::to("/admin"))
}

// =============================================================================
// Orders
// =============================================================================

/// Order status form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Set an order's fulfillment status. Unknown status strings are rejected;
/// the stored column only ever holds the closed set.
#[instrument(skip(state, _admin))]
pub async fn set_order_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    let status: OrderStatus = form
        .status
        .parse()
        .map_err(|e: himal_core::InvalidStatus| AppError::BadRequest(e.to_string()))?;

    OrderRepository::new(state.pool())
        .set_status(OrderId::new(id), status)
        .await?;

    Ok(Redirect::to("/admin"))
}

/// Delete an order from the ledger.
#[instrument(skip(state, _admin))]
pub async fn delete_order(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    OrderRepository::new(state.pool())
        .delete(OrderId::new(id))
        .await?;

    info!(order_id = id, "Order deleted");
    Ok(Redirect::to("/admin"))
}

// =============================================================================
// Settings
// =============================================================================

/// Save site settings from a multipart form with an optional promo image.
#[instrument(skip(state, _admin, multipart))]
pub async fn save_settings(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    mut multipart: Multipart,
) -> Result<Redirect> {
    let repo = SettingsRepository::new(state.pool());

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match name.as_str() {
            "site_title" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let value = value.trim();
                if !value.is_empty() {
                    repo.set(SiteSettings::SITE_TITLE, value).await?;
                }
            }
            "theme" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // Store whatever arrives; rendering falls back to the
                // default theme for unknown names.
                repo.set(SiteSettings::THEME, value.trim()).await?;
            }
            "promo_link" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                repo.set(SiteSettings::PROMO_LINK, value.trim()).await?;
            }
            "promo_image" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if let Some(url) =
                    uploads::store_image(&state.config().upload_dir, &file_name, &data).await?
                {
                    repo.set(SiteSettings::PROMO_IMAGE, &url).await?;
                }
            }
            _ => {}
        }
    }

    Ok(Redirect::to("/admin"))
}

/// Remove the promo banner image.
///
/// The stored link is left alone; without an image the banner never
/// renders, and the link is reused if an image is uploaded again.
#[instrument(skip(state, _admin))]
pub async fn remove_promo(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Redirect> {
    let repo = SettingsRepository::new(state.pool());
    repo.remove(SiteSettings::PROMO_IMAGE).await?;

    Ok(Redirect::to("/admin"))
}

// =============================================================================
// Payment Methods
// =============================================================================

/// Add a payment method from a multipart form with an optional QR image.
#[instrument(skip(state, _admin, multipart))]
pub async fn create_payment_method(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    mut multipart: Multipart,
) -> Result<Redirect> {
    let mut method_name = String::new();
    let mut account_number = String::new();
    let mut qr_image: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match name.as_str() {
            "method_name" => {
                method_name = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "account_number" => {
                account_number = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "qr_image" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                qr_image =
                    uploads::store_image(&state.config().upload_dir, &file_name, &data).await?;
            }
            _ => {}
        }
    }

    let method_name = method_name.trim().to_owned();
    if method_name.is_empty() {
        return Err(AppError::BadRequest("method name is required".to_owned()));
    }

    PaymentMethodRepository::new(state.pool())
        .create(&method_name, account_number.trim(), qr_image.as_deref())
        .await?;

    Ok(Redirect::to("/admin"))
}

/// Delete a payment method.
#[instrument(skip(state, _admin))]
pub async fn delete_payment_method(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    PaymentMethodRepository::new(state.pool())
        .delete(PaymentMethodId::new(id))
        .await?;

    Ok(Redirect::to("/admin"))
}
