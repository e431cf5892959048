//! Types exposed to JavaScript via wasm-bindgen.

use scrapdown_browser::{ElementIds, FeedbackLabels, PageConfig};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Page options. Every field is optional; omitted fields keep the stock
/// page's behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct JsPageConfig {
    /// Quiet period before converting, in milliseconds.
    #[tsify(optional)]
    pub debounce_ms: Option<u32>,
    /// How long "Copied!" / "Removed!" stay up, in milliseconds.
    #[tsify(optional)]
    pub feedback_ms: Option<u32>,
    /// localStorage key for the theme preference.
    #[tsify(optional)]
    pub theme_key: Option<String>,
    #[tsify(optional)]
    pub copy_labels: Option<JsFeedbackLabels>,
    #[tsify(optional)]
    pub remove_labels: Option<JsFeedbackLabels>,
    #[tsify(optional)]
    pub elements: Option<JsElementIds>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsFeedbackLabels {
    pub idle: String,
    pub active: String,
    /// Class added while the active label shows.
    pub marker: String,
}

/// Element ids. Defaults: `markdown-input`, `scrapbox-output`, `copy-btn`,
/// `remove-parens-btn`, `theme-toggle`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct JsElementIds {
    #[tsify(optional)]
    pub input: Option<String>,
    #[tsify(optional)]
    pub output: Option<String>,
    #[tsify(optional)]
    pub copy_button: Option<String>,
    #[tsify(optional)]
    pub remove_parens_button: Option<String>,
    #[tsify(optional)]
    pub theme_toggle: Option<String>,
}

impl From<JsFeedbackLabels> for FeedbackLabels {
    fn from(labels: JsFeedbackLabels) -> Self {
        FeedbackLabels::new(&labels.idle, &labels.active, &labels.marker)
    }
}

impl From<JsElementIds> for ElementIds {
    fn from(ids: JsElementIds) -> Self {
        let defaults = ElementIds::default();
        ElementIds {
            input: ids.input.map(Into::into).unwrap_or(defaults.input),
            output: ids.output.map(Into::into).unwrap_or(defaults.output),
            copy_button: ids.copy_button.map(Into::into).unwrap_or(defaults.copy_button),
            remove_parens_button: ids
                .remove_parens_button
                .map(Into::into)
                .unwrap_or(defaults.remove_parens_button),
            theme_toggle: ids
                .theme_toggle
                .map(Into::into)
                .unwrap_or(defaults.theme_toggle),
        }
    }
}

impl From<JsPageConfig> for PageConfig {
    fn from(js: JsPageConfig) -> Self {
        let mut config = PageConfig::default();
        let pipeline = &mut config.pipeline;
        if let Some(ms) = js.debounce_ms {
            pipeline.debounce_ms = ms;
        }
        if let Some(ms) = js.feedback_ms {
            pipeline.feedback_ms = ms;
        }
        if let Some(key) = js.theme_key {
            pipeline.theme_key = key.into();
        }
        if let Some(labels) = js.copy_labels {
            pipeline.copy_labels = labels.into();
        }
        if let Some(labels) = js.remove_labels {
            pipeline.remove_labels = labels.into();
        }
        if let Some(ids) = js.elements {
            config.elements = ids.into();
        }
        config
    }
}

/// Parse an optional JS options object. `undefined` and `null` give the
/// defaults.
pub fn parse_config(value: JsValue) -> Result<PageConfig, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(PageConfig::default());
    }
    let js: JsPageConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
    Ok(js.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config: PageConfig = JsPageConfig::default().into();
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn test_overrides_apply() {
        let js = JsPageConfig {
            debounce_ms: Some(100),
            theme_key: Some("sb-theme".into()),
            copy_labels: Some(JsFeedbackLabels {
                idle: "Copy text".into(),
                active: "Done".into(),
                marker: "done".into(),
            }),
            elements: Some(JsElementIds {
                input: Some("md".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let config: PageConfig = js.into();

        assert_eq!(config.pipeline.debounce_ms, 100);
        assert_eq!(config.pipeline.feedback_ms, 2000);
        assert_eq!(config.pipeline.theme_key, "sb-theme");
        assert_eq!(config.pipeline.copy_labels.active, "Done");
        assert_eq!(config.pipeline.remove_labels, FeedbackLabels::remove_parens());
        assert_eq!(config.elements.input, "md");
        assert_eq!(config.elements.output, "scrapbox-output");
    }
}
