//! Bridge to a JavaScript converter function.
//!
//! The function is called with the markdown string and may return either a
//! string or a promise of one. A throw or a rejection becomes a
//! [`ConvertError`] whose message is the error's `message` property when it
//! has one.

use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use js_sys::{Function, Promise, Reflect};
use scrapdown_core::{ConvertError, Converter};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Clone)]
pub struct JsConverter {
    function: Function,
}

impl JsConverter {
    pub fn new(function: Function) -> Self {
        Self { function }
    }
}

impl Converter for JsConverter {
    fn convert(&self, markdown: &str) -> LocalBoxFuture<'static, Result<String, ConvertError>> {
        // Call synchronously so the converter sees input in request order.
        let returned = self
            .function
            .call1(&JsValue::NULL, &JsValue::from_str(markdown));
        async move {
            let value = returned.map_err(|e| ConvertError::new(js_error_message(&e)))?;
            let resolved = JsFuture::from(Promise::resolve(&value))
                .await
                .map_err(|e| ConvertError::new(js_error_message(&e)))?;
            resolved
                .as_string()
                .ok_or_else(|| ConvertError::new("converter returned a non-string value"))
        }
        .boxed_local()
    }
}

/// Human-readable message for a thrown or rejected JS value.
///
/// Uses `Error.message` for error objects, a `message` string property
/// for error-like objects, the string itself for thrown strings, and the
/// debug form otherwise.
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    if let Some(message) = Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
    {
        return message;
    }
    if let Some(text) = value.as_string() {
        return text;
    }
    format!("{:?}", value)
}
