//! scrapdown-core: the live markdown → scrapbox page, without a DOM.
//!
//! This crate provides:
//! - `Debouncer` - trailing-edge rate limiting over owned timer handles
//! - `ConversionController` - input → external converter → output, with
//!   stale results discarded
//! - `FeedbackController` - auto-reverting button labels
//! - `ThemeResolver` - stored / OS / default theme precedence
//! - `Pipeline` - the composition of all of the above over injected ports
//!
//! Everything outside the crate (text fields, buttons, storage, clipboard,
//! timers, the converter itself) is reached through the traits in
//! [`platform`] and [`timer`].

pub mod actions;
pub mod cleanup;
pub mod config;
pub mod convert;
pub mod debounce;
pub mod feedback;
pub mod pipeline;
pub mod platform;
pub mod theme;
pub mod timer;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use actions::{CopyOutcome, copy_output, remove_output_parens};
pub use cleanup::remove_empty_parens;
pub use config::PipelineConfig;
pub use convert::{ConversionController, ConvertError, render_outcome};
pub use debounce::Debouncer;
pub use feedback::{FeedbackController, FeedbackLabels, FeedbackState};
pub use pipeline::{Pipeline, PipelinePorts};
pub use platform::{
    Affordance, ClipboardPlatform, ColorSchemeQuery, Converter, PlatformError, PreferenceStore,
    Spawner, TextSlot, ThemeMarker,
};
pub use smol_str::SmolStr;
pub use theme::{Theme, ThemeResolver};
pub use timer::{TimerHandle, TimerPlatform};
pub use web_time::{Duration, Instant};
