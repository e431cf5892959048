//! Browser DOM layer for the scrapdown page.
//!
//! This crate provides web-sys implementations of the
//! `scrapdown-core` ports and mounts the pipeline onto page elements. It
//! assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom`: text fields, buttons, the `data-theme` attribute
//! - `storage`: `localStorage` preference and `prefers-color-scheme`
//! - `clipboard`: `navigator.clipboard.writeText`
//! - `converter`: calling a JavaScript converter function
//! - `timers`: `setTimeout` handles and the local spawner
//! - `page`: element lookup and event wiring
//!
//! # Re-exports
//!
//! This crate re-exports `scrapdown-core` for convenience, so consumers
//! only need to depend on `scrapdown-browser`.

// Re-export core crate
pub use scrapdown_core;
pub use scrapdown_core::*;

pub mod clipboard;
pub mod config;
pub mod converter;
pub mod dom;
pub mod error;
pub mod page;
pub mod storage;
pub mod timers;

pub use clipboard::NavigatorClipboard;
pub use config::{ElementIds, PageConfig};
pub use converter::{JsConverter, js_error_message};
pub use dom::{DocumentThemeMarker, DomButton, DomTextSlot};
pub use error::MountError;
pub use page::{BrowserPipeline, MountedPage, mount};
pub use storage::{LocalStorageStore, MediaQueryScheme};
pub use timers::{BrowserTimers, LocalSpawner};
