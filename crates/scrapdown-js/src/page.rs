//! ScrapdownPage - the mounted page handle exposed to JavaScript.

use std::rc::Rc;

use scrapdown_browser::{JsConverter, MountedPage};
use wasm_bindgen::prelude::*;

use crate::types::parse_config;

/// A converter page attached to the document.
///
/// Call `free()` (or `unmount()`) to detach listeners and cancel timers.
#[wasm_bindgen]
pub struct ScrapdownPage {
    inner: MountedPage,
}

/// Attach the converter page to the current document.
///
/// `converter` is called as `converter(markdown)` and may return a string
/// or a `Promise<string>`. `config` is an optional `JsPageConfig`.
#[wasm_bindgen]
pub fn mount(converter: js_sys::Function, config: JsValue) -> Result<ScrapdownPage, JsError> {
    let config = parse_config(config)?;
    let converter = Rc::new(JsConverter::new(converter));
    let inner = scrapdown_browser::mount(converter, &config)
        .map_err(|e| JsError::new(&format!("Failed to mount: {}", e)))?;
    Ok(ScrapdownPage { inner })
}

#[wasm_bindgen]
impl ScrapdownPage {
    /// Convert the current input immediately, skipping the debounce.
    #[wasm_bindgen(js_name = convertNow)]
    pub fn convert_now(&self) {
        self.inner.convert_now();
    }

    /// Flip between light and dark. Returns the new theme.
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&self) -> String {
        self.inner.toggle_theme().as_str().to_string()
    }

    /// The theme currently shown: `"light"` or `"dark"`.
    #[wasm_bindgen]
    pub fn theme(&self) -> String {
        self.inner.theme().as_str().to_string()
    }

    /// Detach from the page.
    #[wasm_bindgen]
    pub fn unmount(self) {
        tracing::debug!("scrapdown unmounted");
    }
}
