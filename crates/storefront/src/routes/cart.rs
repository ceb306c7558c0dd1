//! Cart route handlers.
//!
//! The cart lives entirely in the session; these handlers mutate it and
//! redirect. Resolution against the catalog happens on render.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Redirect,
};
use tower_sessions::Session;
use tracing::instrument;

use himal_core::ProductId;

use crate::db::products::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::routes::page::PageContext;
use crate::services::cart as cart_service;
use crate::services::cart::CartView;
use crate::state::AppState;

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub ctx: PageContext,
    pub view: CartView,
}

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartShowTemplate> {
    let cart = cart_service::load(&session).await?;
    let products = ProductRepository::find_by_ids(state.pool(), cart.entries()).await?;
    let view = cart_service::resolve(&cart, &products);

    if !view.skipped.is_empty() {
        tracing::debug!(skipped = ?view.skipped, "cart entries no longer in catalog");
    }

    let ctx = PageContext::load(&state, &session).await?;
    Ok(CartShowTemplate { ctx, view })
}

/// Add a product to the cart and bounce back to the page the shopper was on.
///
/// The ID is not checked against the catalog; a bad one is skipped at render
/// time.
#[instrument(skip(session, headers))]
pub async fn add(
    session: Session,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    let mut cart = cart_service::load(&session).await?;
    cart.add(ProductId::new(id));
    cart_service::store(&session, &cart).await?;

    let back = headers
        .get(axum::http::header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("/");

    Ok(Redirect::to(back))
}

/// Remove the cart entry at `index`. A stale index is a silent no-op.
#[instrument(skip(session))]
pub async fn remove(session: Session, Path(index): Path<usize>) -> Result<Redirect> {
    let mut cart = cart_service::load(&session).await?;
    if cart.remove_at(index).is_some() {
        cart_service::store(&session, &cart).await?;
    }

    Ok(Redirect::to("/cart"))
}
