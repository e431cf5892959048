//! Page configuration: pipeline settings plus element ids.

use scrapdown_core::PipelineConfig;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Ids of the elements the pipeline attaches to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementIds {
    pub input: SmolStr,
    pub output: SmolStr,
    pub copy_button: SmolStr,
    pub remove_parens_button: SmolStr,
    pub theme_toggle: SmolStr,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            input: "markdown-input".into(),
            output: "scrapbox-output".into(),
            copy_button: "copy-btn".into(),
            remove_parens_button: "remove-parens-btn".into(),
            theme_toggle: "theme-toggle".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    #[serde(flatten)]
    pub pipeline: PipelineConfig,
    pub elements: ElementIds,
}
