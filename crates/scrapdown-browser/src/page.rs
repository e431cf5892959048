//! Mounting the pipeline onto page elements.
//!
//! Looks up the configured elements, wraps them as core ports, and wires
//! `input` / `click` listeners to the pipeline. The listeners hold weak
//! references, so dropping the [`MountedPage`] detaches everything and
//! cancels pending timers.

use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use scrapdown_core::{Converter, Pipeline, PipelinePorts, Theme};
use web_sys::EventTarget;

use crate::clipboard::NavigatorClipboard;
use crate::config::PageConfig;
use crate::dom::{self, DocumentThemeMarker, DomButton, DomTextSlot};
use crate::error::MountError;
use crate::storage::{LocalStorageStore, MediaQueryScheme};
use crate::timers::{BrowserTimers, LocalSpawner};

pub type BrowserPipeline = Pipeline<BrowserTimers>;

/// A live, attached page. Detaches on drop.
pub struct MountedPage {
    pipeline: Rc<BrowserPipeline>,
    _listeners: Vec<EventListener>,
}

impl MountedPage {
    pub fn pipeline(&self) -> &BrowserPipeline {
        &self.pipeline
    }

    pub fn convert_now(&self) {
        self.pipeline.convert_now();
    }

    pub fn toggle_theme(&self) -> Theme {
        self.pipeline.on_toggle_theme()
    }

    pub fn theme(&self) -> Theme {
        self.pipeline.theme()
    }
}

/// Attach the pipeline to the current document.
///
/// Applies the startup theme and converts any pre-filled input before
/// returning.
pub fn mount(converter: Rc<dyn Converter>, config: &PageConfig) -> Result<MountedPage, MountError> {
    let document = dom::document()?;
    let ids = &config.elements;

    let input = DomTextSlot::from_id(&document, &ids.input)?;
    let output = DomTextSlot::from_id(&document, &ids.output)?;
    let copy_button = DomButton::from_id(&document, &ids.copy_button)?;
    let remove_button = DomButton::from_id(&document, &ids.remove_parens_button)?;
    let theme_toggle = DomButton::from_id(&document, &ids.theme_toggle)?;
    let marker = DocumentThemeMarker::from_document(&document)?;

    let ports = PipelinePorts {
        input: Rc::new(input.clone()),
        output: Rc::new(output),
        converter,
        clipboard: Rc::new(NavigatorClipboard),
        store: Rc::new(LocalStorageStore),
        scheme: Rc::new(MediaQueryScheme),
        marker: Rc::new(marker),
        copy_button: Rc::new(copy_button.clone()),
        remove_button: Rc::new(remove_button.clone()),
        spawner: Rc::new(LocalSpawner),
    };
    let pipeline = Rc::new(Pipeline::new(BrowserTimers, ports, &config.pipeline));

    let listeners = vec![
        listen(input.element(), "input", &pipeline, |p| p.on_input()),
        listen(copy_button.element(), "click", &pipeline, |p| p.on_copy()),
        listen(remove_button.element(), "click", &pipeline, |p| {
            p.on_remove_parens();
        }),
        listen(theme_toggle.element(), "click", &pipeline, |p| {
            p.on_toggle_theme();
        }),
    ];

    let theme = pipeline.start();
    tracing::info!(%theme, input = %ids.input, output = %ids.output, "scrapdown mounted");

    Ok(MountedPage {
        pipeline,
        _listeners: listeners,
    })
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    pipeline: &Rc<BrowserPipeline>,
    handler: impl Fn(&BrowserPipeline) + 'static,
) -> EventListener {
    let pipeline: Weak<BrowserPipeline> = Rc::downgrade(pipeline);
    EventListener::new(target, event, move |_event| {
        if let Some(pipeline) = pipeline.upgrade() {
            handler(&pipeline);
        }
    })
}
