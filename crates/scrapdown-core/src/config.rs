//! Pipeline configuration.
//!
//! Every field has a default matching the stock page, so hosts only pass
//! what they want to change. Deserialized from a camelCase object.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use web_time::Duration;

use crate::feedback::FeedbackLabels;
use crate::theme::THEME_KEY;

/// Quiet period before a conversion fires.
pub const DEFAULT_DEBOUNCE_MS: u32 = 300;
/// Time a button stays in its feedback state.
pub const DEFAULT_FEEDBACK_MS: u32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    pub debounce_ms: u32,
    pub feedback_ms: u32,
    pub theme_key: SmolStr,
    pub copy_labels: FeedbackLabels,
    pub remove_labels: FeedbackLabels,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            feedback_ms: DEFAULT_FEEDBACK_MS,
            theme_key: THEME_KEY.into(),
            copy_labels: FeedbackLabels::copy(),
            remove_labels: FeedbackLabels::remove_parens(),
        }
    }
}

impl PipelineConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.into())
    }

    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms.into())
    }
}
