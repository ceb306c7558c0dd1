//! Site appearance settings.
//!
//! Settings are stored as plain key/value rows. This module gives the
//! handful of known keys a typed shape and maps the stored theme name to a
//! concrete set of CSS classes, falling back to the default theme when the
//! stored name is unknown.

use std::collections::HashMap;

/// Provinces offered by the checkout shipping form.
pub const PROVINCES: &[&str] = &[
    "Koshi",
    "Madhesh",
    "Bagmati",
    "Gandaki",
    "Lumbini",
    "Karnali",
    "Sudurpashchim",
];

/// A named appearance theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub body_class: &'static str,
    pub nav_class: &'static str,
    pub accent_class: &'static str,
}

/// All selectable themes, in the order the admin console lists them.
pub const THEMES: &[Theme] = &[
    Theme {
        name: "Modern White",
        body_class: "theme-light",
        nav_class: "nav-light",
        accent_class: "accent-dark",
    },
    Theme {
        name: "Dashain Festival",
        body_class: "theme-festival",
        nav_class: "nav-red",
        accent_class: "accent-red",
    },
    Theme {
        name: "Tihar Night",
        body_class: "theme-night",
        nav_class: "nav-dark",
        accent_class: "accent-purple",
    },
];

impl Theme {
    /// Look up a theme by its stored name, falling back to the default.
    #[must_use]
    pub fn by_name(name: Option<&str>) -> Self {
        name.and_then(|n| THEMES.iter().find(|t| t.name == n).copied())
            .unwrap_or(THEMES[0])
    }
}

/// The typed view over the settings table.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub site_title: String,
    pub theme: Theme,
    pub promo_image: Option<String>,
    pub promo_link: Option<String>,
}

impl SiteSettings {
    /// Known settings keys.
    pub const SITE_TITLE: &'static str = "site_title";
    pub const THEME: &'static str = "theme";
    pub const PROMO_IMAGE: &'static str = "promo_image";
    pub const PROMO_LINK: &'static str = "promo_link";

    /// Build typed settings from raw key/value rows.
    #[must_use]
    pub fn from_rows(rows: &HashMap<String, String>) -> Self {
        Self {
            site_title: rows
                .get(Self::SITE_TITLE)
                .cloned()
                .unwrap_or_else(|| "Himal Store".to_owned()),
            theme: Theme::by_name(rows.get(Self::THEME).map(String::as_str)),
            promo_image: rows.get(Self::PROMO_IMAGE).cloned(),
            promo_link: rows.get(Self::PROMO_LINK).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        assert_eq!(Theme::by_name(Some("Neon Future")).name, "Modern White");
        assert_eq!(Theme::by_name(None).name, "Modern White");
    }

    #[test]
    fn test_known_theme_is_found() {
        assert_eq!(Theme::by_name(Some("Tihar Night")).name, "Tihar Night");
    }

    #[test]
    fn test_settings_defaults() {
        let settings = SiteSettings::from_rows(&HashMap::new());
        assert_eq!(settings.site_title, "Himal Store");
        assert_eq!(settings.theme.name, "Modern White");
        assert!(settings.promo_image.is_none());
    }
}
