//! Platform abstraction traits for the conversion page.
//!
//! These traits define the interface between the pipeline logic and the
//! page it runs in (browser DOM, or in-memory fakes under test). Every
//! collaborator the pipeline touches is reached through one of these ports
//! rather than through ambient globals.
//!
//! All methods take `&self`: the host is single-threaded and DOM handles
//! already mutate through shared references, so implementations use
//! interior mutability where they need it.

use std::rc::Rc;

use futures_util::future::LocalBoxFuture;

use crate::convert::ConvertError;
use crate::theme::Theme;

/// Error type for platform operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("{0}")]
#[diagnostic(code(scrapdown::platform))]
pub struct PlatformError(pub String);

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// A readable and writable text field.
///
/// Used for both the markdown input and the scrapbox output.
pub trait TextSlot {
    /// Current contents of the field.
    fn text(&self) -> String;

    /// Replace the contents of the field.
    fn set_text(&self, text: &str);
}

/// The external markdown to scrapbox converter.
///
/// Treated as a black box. The returned future resolves to the converted
/// text, or to a [`ConvertError`] carrying a human-readable message.
pub trait Converter {
    fn convert(&self, markdown: &str) -> LocalBoxFuture<'static, Result<String, ConvertError>>;
}

/// Asynchronous clipboard writes.
pub trait ClipboardPlatform {
    /// Write plain text to the system clipboard.
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), PlatformError>>;
}

/// Single-key persistent string storage (e.g. `localStorage`).
pub trait PreferenceStore {
    /// Read a stored value. `None` means unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Persist a value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError>;
}

/// OS-level color scheme signal.
pub trait ColorSchemeQuery {
    /// Does the platform prefer a dark color scheme?
    fn prefers_dark(&self) -> bool;
}

/// The page-visible theme marker consumed by styling.
pub trait ThemeMarker {
    /// Raw marker value, if one is set.
    fn current(&self) -> Option<String>;

    fn set(&self, theme: Theme);
}

/// A button whose label and marker class flip while feedback is shown.
pub trait Affordance {
    fn set_label(&self, label: &str);

    /// Add (`active == true`) or remove the marker class.
    fn set_marker(&self, marker: &str, active: bool);
}

/// Runs futures on the host's local executor.
pub trait Spawner {
    fn spawn_local(&self, fut: LocalBoxFuture<'static, ()>);
}

// Shared handles forward to the wrapped port, so components can be built
// over `Rc<dyn Port>` as easily as over concrete types.

impl<T: TextSlot + ?Sized> TextSlot for Rc<T> {
    fn text(&self) -> String {
        (**self).text()
    }

    fn set_text(&self, text: &str) {
        (**self).set_text(text)
    }
}

impl<T: Converter + ?Sized> Converter for Rc<T> {
    fn convert(&self, markdown: &str) -> LocalBoxFuture<'static, Result<String, ConvertError>> {
        (**self).convert(markdown)
    }
}

impl<T: ClipboardPlatform + ?Sized> ClipboardPlatform for Rc<T> {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), PlatformError>> {
        (**self).write_text(text)
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        (**self).set(key, value)
    }
}

impl<T: ColorSchemeQuery + ?Sized> ColorSchemeQuery for Rc<T> {
    fn prefers_dark(&self) -> bool {
        (**self).prefers_dark()
    }
}

impl<T: ThemeMarker + ?Sized> ThemeMarker for Rc<T> {
    fn current(&self) -> Option<String> {
        (**self).current()
    }

    fn set(&self, theme: Theme) {
        (**self).set(theme)
    }
}

impl<T: Affordance + ?Sized> Affordance for Rc<T> {
    fn set_label(&self, label: &str) {
        (**self).set_label(label)
    }

    fn set_marker(&self, marker: &str, active: bool) {
        (**self).set_marker(marker, active)
    }
}

impl<T: Spawner + ?Sized> Spawner for Rc<T> {
    fn spawn_local(&self, fut: LocalBoxFuture<'static, ()>) {
        (**self).spawn_local(fut)
    }
}
