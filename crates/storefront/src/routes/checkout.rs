//! Checkout route handlers.
//!
//! GET renders the order review with the shipping form prefilled from the
//! profile; POST runs the checkout workflow. The session cart is cleared
//! only after the order has committed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, instrument};

use himal_core::Cart;

use crate::db::payment_methods::PaymentMethodRepository;
use crate::db::products::ProductRepository;
use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{PaymentMethod, PROVINCES};
use crate::routes::page::PageContext;
use crate::services::cart as cart_service;
use crate::services::cart::CartView;
use crate::services::checkout::{self, CheckoutError, CheckoutForm};
use crate::state::AppState;

/// Checkout form fields.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub address: String,
}

impl From<PlaceOrderForm> for CheckoutForm {
    fn from(form: PlaceOrderForm) -> Self {
        Self {
            full_name: form.full_name,
            mobile: form.mobile,
            province: form.province,
            address: form.address,
        }
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub ctx: PageContext,
    pub view: CartView,
    pub payment_methods: Vec<PaymentMethod>,
    pub provinces: &'static [&'static str],
    pub form: CheckoutForm,
    pub missing: Vec<&'static str>,
}

async fn build_page(
    state: &AppState,
    session: &Session,
    cart: &Cart,
    form: CheckoutForm,
    missing: Vec<&'static str>,
) -> Result<CheckoutTemplate> {
    let products = ProductRepository::find_by_ids(state.pool(), cart.entries()).await?;
    let view = cart_service::resolve(cart, &products);
    let payment_methods = PaymentMethodRepository::new(state.pool()).list().await?;
    let ctx = PageContext::load(state, session).await?;

    Ok(CheckoutTemplate {
        ctx,
        view,
        payment_methods,
        provinces: PROVINCES,
        form,
        missing,
    })
}

/// Display the checkout page; an empty cart has nothing to check out and
/// redirects home.
#[instrument(skip(state, session, user))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<Response> {
    let cart = cart_service::load(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/").into_response());
    }

    // Prefill shipping from the saved profile.
    let form = match UserRepository::new(state.pool()).get_by_id(user.id).await? {
        Some(profile) => CheckoutForm {
            full_name: profile.full_name.unwrap_or_default(),
            mobile: profile.mobile.unwrap_or_default(),
            province: profile.province.unwrap_or_default(),
            address: String::new(),
        },
        None => CheckoutForm::default(),
    };

    let page = build_page(&state, &session, &cart, form, Vec::new()).await?;
    if page.view.is_empty() {
        // Everything in the cart has since left the catalog.
        return Ok(Redirect::to("/").into_response());
    }

    Ok(page.into_response())
}

/// Place the order.
#[instrument(skip(state, session, user, form))]
pub async fn place(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Form(form): Form<PlaceOrderForm>,
) -> Result<Response> {
    let cart = cart_service::load(&session).await?;
    let form = CheckoutForm::from(form);

    match checkout::place_order(state.pool(), user.id, &cart, &form).await {
        Ok(order) => {
            // The order is committed; only now does the cart go away.
            cart_service::store(&session, &Cart::new()).await?;
            info!(order_id = %order.id, total = %order.total_amount, "Order placed");
            Ok(Redirect::to("/account").into_response())
        }
        Err(CheckoutError::EmptyCart) => Ok(Redirect::to("/").into_response()),
        Err(CheckoutError::MissingFields(missing)) => {
            let page = build_page(&state, &session, &cart, form, missing).await?;
            Ok(page.into_response())
        }
        Err(CheckoutError::Repository(e)) => Err(AppError::Database(e)),
    }
}
