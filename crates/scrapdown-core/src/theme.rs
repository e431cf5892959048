//! Light/dark theme preference.
//!
//! Resolution order at startup: the stored choice, then the OS color scheme,
//! then light. Applying a theme writes the store first and the page marker
//! second, so the two agree once [`ThemeResolver::apply_theme`] returns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::platform::{ColorSchemeQuery, PreferenceStore, ThemeMarker};

/// Default storage key for the preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("unknown theme {0:?}")]
#[diagnostic(code(scrapdown::theme))]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

pub struct ThemeResolver<S, Q, M> {
    store: S,
    scheme: Q,
    marker: M,
    key: SmolStr,
}

impl<S, Q, M> ThemeResolver<S, Q, M>
where
    S: PreferenceStore,
    Q: ColorSchemeQuery,
    M: ThemeMarker,
{
    pub fn new(store: S, scheme: Q, marker: M) -> Self {
        Self::with_key(store, scheme, marker, THEME_KEY)
    }

    pub fn with_key(store: S, scheme: Q, marker: M, key: &str) -> Self {
        Self {
            store,
            scheme,
            marker,
            key: key.into(),
        }
    }

    /// Stored choice if valid, else the OS preference, else light.
    pub fn resolve_initial_theme(&self) -> Theme {
        if let Some(stored) = self.store.get(&self.key) {
            match stored.parse() {
                Ok(theme) => return theme,
                Err(e) => tracing::debug!(error = %e, "ignoring stored theme"),
            }
        }
        if self.scheme.prefers_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Persist `theme` and update the page marker.
    ///
    /// A rejected storage write is logged; the marker is still updated so
    /// the page reflects the user's choice for this session.
    pub fn apply_theme(&self, theme: Theme) {
        if let Err(e) = self.store.set(&self.key, theme.as_str()) {
            tracing::warn!(error = %e, %theme, "failed to persist theme preference");
        }
        self.marker.set(theme);
        tracing::debug!(%theme, "theme applied");
    }

    /// Theme currently shown on the page; light when unset or unknown.
    pub fn current_theme(&self) -> Theme {
        self.marker
            .current()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    /// Flip the shown theme and apply it.
    pub fn toggle_theme(&self) -> Theme {
        let next = self.current_theme().toggled();
        self.apply_theme(next);
        next
    }

    /// Resolve and apply the startup theme.
    pub fn init(&self) -> Theme {
        let theme = self.resolve_initial_theme();
        self.apply_theme(theme);
        theme
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
