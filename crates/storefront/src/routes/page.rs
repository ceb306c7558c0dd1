//! Shared template context.
//!
//! Every full page carries the same chrome: site title, active theme, cart
//! badge count and the logged-in user. [`PageContext::load`] gathers them in
//! one place so handlers stay small.

use tower_sessions::Session;

use crate::db::settings::SettingsRepository;
use crate::error::Result;
use crate::models::{CurrentUser, SiteSettings, session_keys};
use crate::services::cart as cart_service;
use crate::state::AppState;

/// Data common to every rendered page.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub settings: SiteSettings,
    pub cart_count: usize,
    pub current_user: Option<CurrentUser>,
}

impl PageContext {
    /// Assemble the page chrome from settings, session cart and login state.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the settings cannot be read, or
    /// `AppError::Session` if the session store fails.
    pub async fn load(state: &AppState, session: &Session) -> Result<Self> {
        let rows = SettingsRepository::new(state.pool()).all().await?;
        let settings = SiteSettings::from_rows(&rows);

        let cart = cart_service::load(session).await?;

        let current_user = session
            .get::<CurrentUser>(session_keys::CURRENT_USER)
            .await?;

        Ok(Self {
            settings,
            cart_count: cart.len(),
            current_user,
        })
    }

    /// Whether the current user is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(|u| u.is_admin)
    }
}
