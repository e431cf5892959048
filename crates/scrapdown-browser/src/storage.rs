//! `localStorage` preference store and the OS color scheme query.
//!
//! Values are stored as plain strings (`"dark"`, not `"\"dark\""`), so a
//! page that already wrote the key from plain JavaScript keeps working.

use scrapdown_core::{ColorSchemeQuery, PlatformError, PreferenceStore};

/// Media query for the OS dark mode preference.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, PlatformError> {
        let window = web_sys::window().ok_or_else(|| PlatformError::from("no window"))?;
        window
            .local_storage()
            .map_err(|e| PlatformError(format!("localStorage unavailable: {:?}", e)))?
            .ok_or_else(|| PlatformError::from("localStorage unavailable"))
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = match Self::storage() {
            Ok(storage) => storage,
            Err(e) => {
                tracing::debug!("Preference read skipped: {}", e);
                return None;
            }
        };
        storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| PlatformError(format!("localStorage write failed: {:?}", e)))
    }
}

/// `matchMedia("(prefers-color-scheme: dark)")`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaQueryScheme;

impl ColorSchemeQuery for MediaQueryScheme {
    fn prefers_dark(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.match_media(PREFERS_DARK_QUERY).ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
}
