//! Account page: profile and order history.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::orders::OrderRepository;
use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{Order, PROVINCES, User};
use crate::routes::page::PageContext;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Profile update form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub province: String,
}

/// Password change form data.
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
}

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub ctx: PageContext,
    pub profile: User,
    pub orders: Vec<Order>,
    pub provinces: &'static [&'static str],
}

/// Display profile details and the user's orders, newest first.
#[instrument(skip(state, session, user))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<AccountTemplate> {
    let profile = UserRepository::new(state.pool())
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("account".to_owned()))?;

    let orders = OrderRepository::new(state.pool())
        .list_by_user(user.id)
        .await?;

    let ctx = PageContext::load(&state, &session).await?;
    Ok(AccountTemplate {
        ctx,
        profile,
        orders,
        provinces: PROVINCES,
    })
}

/// Update the shipping profile.
#[instrument(skip(state, user, form))]
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ProfileForm>,
) -> Result<Redirect> {
    UserRepository::update_profile(
        state.pool(),
        user.id,
        form.full_name.trim(),
        form.mobile.trim(),
        form.province.trim(),
    )
    .await?;

    Ok(Redirect::to("/account"))
}

/// Change the account password.
#[instrument(skip(state, user, form))]
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<PasswordForm>,
) -> Result<Redirect> {
    let profile = UserRepository::new(state.pool())
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("account".to_owned()))?;

    AuthService::new(state.pool())
        .change_password(&profile, &form.current_password, &form.new_password)
        .await?;

    Ok(Redirect::to("/account"))
}
