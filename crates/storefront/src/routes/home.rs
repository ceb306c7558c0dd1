//! Home page: the catalog listing with optional search.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::products::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::models::Product;
use crate::routes::page::PageContext;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ctx: PageContext,
    pub products: Vec<Product>,
    pub query: Option<String>,
}

/// Display the catalog, newest first, filtered by `?q=` when present.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SearchParams>,
) -> Result<HomeTemplate> {
    let ctx = PageContext::load(&state, &session).await?;

    let products = ProductRepository::new(state.pool())
        .search(params.q.as_deref())
        .await?;

    Ok(HomeTemplate {
        ctx,
        products,
        query: params.q,
    })
}
