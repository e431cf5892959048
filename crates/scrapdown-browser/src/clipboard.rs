//! Browser clipboard implementation.
//!
//! Implements `ClipboardPlatform` with the async Clipboard API
//! (`navigator.clipboard.writeText`), which works outside clipboard events
//! and so suits a plain button click.

use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use scrapdown_core::{ClipboardPlatform, PlatformError};
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Copy, Default)]
pub struct NavigatorClipboard;

impl ClipboardPlatform for NavigatorClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), PlatformError>> {
        let text = text.to_string();
        async move {
            write_text_to_clipboard(&text)
                .await
                .map_err(|e| PlatformError(crate::converter::js_error_message(&e)))
        }
        .boxed_local()
    }
}

/// Write plain text with `navigator.clipboard.writeText`.
pub async fn write_text_to_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clipboard = window.navigator().clipboard();
    wasm_bindgen_futures::JsFuture::from(clipboard.write_text(text)).await?;
    tracing::debug!("Wrote {} bytes to clipboard", text.len());
    Ok(())
}
