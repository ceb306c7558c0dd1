//! Product detail page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use himal_core::ProductId;

use crate::db::products::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::models::Product;
use crate::routes::page::PageContext;
use crate::state::AppState;

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub ctx: PageContext,
    pub product: Product,
}

/// Display one product. Unknown IDs redirect to the catalog rather than 404:
/// the link usually comes from a stale page after an admin deletion.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response> {
    let Some(product) = ProductRepository::new(state.pool())
        .find_by_id(ProductId::new(id))
        .await?
    else {
        return Ok(Redirect::to("/").into_response());
    };

    let ctx = PageContext::load(&state, &session).await?;
    Ok(ProductShowTemplate { ctx, product }.into_response())
}
