//! Login, registration and logout.
//!
//! On login a small [`CurrentUser`] snapshot (including the admin flag) is
//! written into the session; nothing else re-reads the account row per
//! request.

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

use crate::error::{clear_sentry_user, set_sentry_user, Result};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::page::PageContext;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
}

/// Display the login page.
#[instrument(skip(state, session))]
pub async fn login_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<LoginTemplate> {
    let ctx = PageContext::load(&state, &session).await?;
    Ok(LoginTemplate { ctx, error: None })
}

/// Log a user in.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let service = AuthService::new(state.pool());

    match service.login(&form.email, &form.password).await {
        Ok(user) => {
            let current = CurrentUser {
                id: user.id,
                email: user.email.clone(),
                is_admin: user.is_admin,
            };
            set_current_user(&session, &current).await?;
            set_sentry_user(&user.id, Some(user.email.as_str()));
            info!(user_id = %user.id, "User logged in");

            let target = if user.is_admin { "/admin" } else { "/" };
            Ok(Redirect::to(target).into_response())
        }
        Err(AuthError::InvalidCredentials | AuthError::InvalidEmail(_)) => {
            let ctx = PageContext::load(&state, &session).await?;
            Ok(LoginTemplate {
                ctx,
                error: Some("Invalid email or password".to_owned()),
            }
            .into_response())
        }
        Err(other) => Err(other.into()),
    }
}

/// Display the registration page.
#[instrument(skip(state, session))]
pub async fn register_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<RegisterTemplate> {
    let ctx = PageContext::load(&state, &session).await?;
    Ok(RegisterTemplate { ctx, error: None })
}

/// Register a new account and log it in.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let service = AuthService::new(state.pool());

    let full_name = form.full_name.trim();
    let full_name = (!full_name.is_empty()).then_some(full_name);

    match service.register(&form.email, full_name, &form.password).await {
        Ok(user) => {
            let current = CurrentUser {
                id: user.id,
                email: user.email.clone(),
                is_admin: user.is_admin,
            };
            set_current_user(&session, &current).await?;
            set_sentry_user(&user.id, Some(user.email.as_str()));
            info!(user_id = %user.id, "User registered");
            Ok(Redirect::to("/").into_response())
        }
        Err(
            e @ (AuthError::InvalidEmail(_)
            | AuthError::WeakPassword(_)
            | AuthError::UserAlreadyExists),
        ) => {
            let message = match e {
                AuthError::InvalidEmail(_) => "Invalid email address".to_owned(),
                AuthError::WeakPassword(msg) => msg,
                _ => "An account with this email already exists".to_owned(),
            };
            let ctx = PageContext::load(&state, &session).await?;
            Ok(RegisterTemplate {
                ctx,
                error: Some(message),
            }
            .into_response())
        }
        Err(other) => Err(other.into()),
    }
}

/// Log out: drop the user from the session, keep the cart.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/"))
}
