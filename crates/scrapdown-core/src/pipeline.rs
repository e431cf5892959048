//! Composition of the page: input events through the debouncer to the
//! conversion controller, clicks to the feedback controllers and the theme
//! resolver.
//!
//! The pipeline owns every timer it schedules. Dropping it cancels the
//! pending conversion fire and any pending label reverts.

use std::rc::Rc;

use futures_util::FutureExt;

use crate::actions::{copy_output, remove_output_parens};
use crate::config::PipelineConfig;
use crate::convert::ConversionController;
use crate::debounce::Debouncer;
use crate::feedback::FeedbackController;
use crate::platform::{
    Affordance, ClipboardPlatform, ColorSchemeQuery, Converter, PreferenceStore, Spawner,
    TextSlot, ThemeMarker,
};
use crate::theme::{Theme, ThemeResolver};
use crate::timer::TimerPlatform;

/// Everything the pipeline talks to.
#[derive(Clone)]
pub struct PipelinePorts {
    pub input: Rc<dyn TextSlot>,
    pub output: Rc<dyn TextSlot>,
    pub converter: Rc<dyn Converter>,
    pub clipboard: Rc<dyn ClipboardPlatform>,
    pub store: Rc<dyn PreferenceStore>,
    pub scheme: Rc<dyn ColorSchemeQuery>,
    pub marker: Rc<dyn ThemeMarker>,
    pub copy_button: Rc<dyn Affordance>,
    pub remove_button: Rc<dyn Affordance>,
    pub spawner: Rc<dyn Spawner>,
}

type Conversion = ConversionController<Rc<dyn TextSlot>, Rc<dyn TextSlot>, Rc<dyn Converter>>;
type Feedback<P> = FeedbackController<P, Rc<dyn Affordance>>;
type Themes = ThemeResolver<Rc<dyn PreferenceStore>, Rc<dyn ColorSchemeQuery>, Rc<dyn ThemeMarker>>;

pub struct Pipeline<P: TimerPlatform> {
    conversion: Rc<Conversion>,
    debouncer: Debouncer<P, ()>,
    copy_feedback: Rc<Feedback<P>>,
    remove_feedback: Feedback<P>,
    theme: Themes,
    output: Rc<dyn TextSlot>,
    clipboard: Rc<dyn ClipboardPlatform>,
    spawner: Rc<dyn Spawner>,
}

impl<P> Pipeline<P>
where
    P: TimerPlatform + Clone + 'static,
{
    pub fn new(timers: P, ports: PipelinePorts, config: &PipelineConfig) -> Self {
        let conversion = ConversionController::new(
            ports.input.clone(),
            ports.output.clone(),
            ports.converter.clone(),
        );

        let debouncer = {
            let conversion = conversion.clone();
            let spawner = ports.spawner.clone();
            Debouncer::new(timers.clone(), config.debounce(), move |()| {
                dispatch(&conversion, spawner.as_ref());
            })
        };

        let copy_feedback = Rc::new(FeedbackController::new(
            timers.clone(),
            ports.copy_button.clone(),
            config.copy_labels.clone(),
            config.feedback(),
        ));
        let remove_feedback = FeedbackController::new(
            timers,
            ports.remove_button.clone(),
            config.remove_labels.clone(),
            config.feedback(),
        );

        let theme = ThemeResolver::with_key(
            ports.store.clone(),
            ports.scheme.clone(),
            ports.marker.clone(),
            &config.theme_key,
        );

        Self {
            conversion,
            debouncer,
            copy_feedback,
            remove_feedback,
            theme,
            output: ports.output,
            clipboard: ports.clipboard,
            spawner: ports.spawner,
        }
    }

    /// Apply the startup theme and convert pre-filled input.
    pub fn start(&self) -> Theme {
        let theme = self.theme.init();
        if self.conversion.has_input() {
            tracing::debug!("converting pre-filled input");
            self.convert_now();
        }
        theme
    }

    /// Input changed. Schedules a debounced conversion.
    pub fn on_input(&self) {
        self.debouncer.trigger(());
    }

    /// Convert immediately, dropping any pending debounced fire.
    pub fn convert_now(&self) {
        self.debouncer.cancel();
        dispatch(&self.conversion, self.spawner.as_ref());
    }

    pub fn on_copy(&self) {
        let output = self.output.clone();
        let clipboard = self.clipboard.clone();
        let feedback = self.copy_feedback.clone();
        self.spawner.spawn_local(
            async move {
                let outcome = copy_output(&*output, &*clipboard, &*feedback).await;
                tracing::debug!(?outcome, "copy clicked");
            }
            .boxed_local(),
        );
    }

    pub fn on_remove_parens(&self) -> bool {
        remove_output_parens(&*self.output, &self.remove_feedback)
    }

    pub fn on_toggle_theme(&self) -> Theme {
        self.theme.toggle_theme()
    }

    pub fn theme(&self) -> Theme {
        self.theme.current_theme()
    }

    pub fn is_conversion_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn copy_feedback(&self) -> &Feedback<P> {
        &self.copy_feedback
    }

    pub fn remove_feedback(&self) -> &Feedback<P> {
        &self.remove_feedback
    }
}

fn dispatch(conversion: &Rc<Conversion>, spawner: &dyn Spawner) {
    if let Some(pending) = conversion.convert() {
        spawner.spawn_local(pending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        FixedScheme, FnConverter, ManualClock, MemoryAffordance, MemoryClipboard, MemoryMarker,
        MemorySlot, MemoryStore, QueuedSpawner,
    };
    use web_time::Duration;

    struct Fixture {
        clock: ManualClock,
        input: MemorySlot,
        output: MemorySlot,
        converter: FnConverter,
        clipboard: MemoryClipboard,
        store: MemoryStore,
        marker: MemoryMarker,
        copy_button: MemoryAffordance,
        remove_button: MemoryAffordance,
        spawner: QueuedSpawner,
        pipeline: Pipeline<ManualClock>,
    }

    fn fixture(initial_input: &str, os_dark: bool) -> Fixture {
        let clock = ManualClock::new();
        let input = MemorySlot::new(initial_input);
        let output = MemorySlot::default();
        let converter = FnConverter::new(|md| {
            if md.contains("!fail") {
                Err(crate::convert::ConvertError::new("unsupported syntax"))
            } else {
                Ok(md.replace("**", "[* ").replace("__", "]"))
            }
        });
        let clipboard = MemoryClipboard::default();
        let store = MemoryStore::default();
        let marker = MemoryMarker::default();
        let copy_button = MemoryAffordance::new("Copy");
        let remove_button = MemoryAffordance::new("Remove ()");
        let spawner = QueuedSpawner::default();

        let ports = PipelinePorts {
            input: Rc::new(input.clone()),
            output: Rc::new(output.clone()),
            converter: Rc::new(converter.clone()),
            clipboard: Rc::new(clipboard.clone()),
            store: Rc::new(store.clone()),
            scheme: Rc::new(FixedScheme { dark: os_dark }),
            marker: Rc::new(marker.clone()),
            copy_button: Rc::new(copy_button.clone()),
            remove_button: Rc::new(remove_button.clone()),
            spawner: Rc::new(spawner.clone()),
        };
        let pipeline = Pipeline::new(clock.clone(), ports, &PipelineConfig::default());

        Fixture {
            clock,
            input,
            output,
            converter,
            clipboard,
            store,
            marker,
            copy_button,
            remove_button,
            spawner,
            pipeline,
        }
    }

    fn type_text(f: &Fixture, text: &str) {
        f.input.set_text(text);
        f.pipeline.on_input();
    }

    #[tokio::test]
    async fn test_typing_burst_converts_once() {
        let f = fixture("", false);

        for prefix in ["#", "# h", "# he", "# hel", "# hello"] {
            type_text(&f, prefix);
            f.clock.advance(Duration::from_millis(50));
        }
        assert!(f.spawner.is_empty());

        f.clock.advance(Duration::from_millis(300));
        f.spawner.run_all().await;

        assert_eq!(f.converter.calls(), vec!["# hello".to_string()]);
        assert_eq!(f.output.text(), "# hello");
    }

    #[tokio::test]
    async fn test_start_converts_prefilled_input_and_applies_theme() {
        let f = fixture("**bold__", true);

        assert_eq!(f.pipeline.start(), Theme::Dark);
        assert_eq!(f.marker.current().as_deref(), Some("dark"));
        assert_eq!(f.store.get("theme").as_deref(), Some("dark"));

        f.spawner.run_all().await;
        assert_eq!(f.output.text(), "[* bold]");
    }

    #[test]
    fn test_start_with_empty_input_skips_conversion() {
        let f = fixture("", false);

        f.pipeline.start();

        assert!(f.spawner.is_empty());
        assert!(f.converter.calls().is_empty());
        assert_eq!(f.output.writes(), 0);
    }

    #[test]
    fn test_clearing_input_clears_output_after_debounce() {
        let f = fixture("", false);
        f.output.set_text("old result");

        type_text(&f, "  \n");
        assert_eq!(f.output.text(), "old result");
        f.clock.advance(Duration::from_millis(300));

        assert_eq!(f.output.text(), "");
        assert!(f.spawner.is_empty());
        assert!(f.converter.calls().is_empty());
    }

    #[tokio::test]
    async fn test_converter_error_surfaces_in_output() {
        let f = fixture("", false);

        type_text(&f, "!fail");
        f.clock.advance(Duration::from_millis(300));
        f.spawner.run_all().await;

        assert_eq!(f.output.text(), "Error: unsupported syntax");
    }

    #[tokio::test]
    async fn test_convert_now_bypasses_debounce() {
        let f = fixture("", false);

        type_text(&f, "x");
        assert!(f.pipeline.is_conversion_pending());
        f.pipeline.convert_now();
        assert!(!f.pipeline.is_conversion_pending());
        f.spawner.run_all().await;

        f.clock.advance(Duration::from_secs(1));
        assert!(f.spawner.is_empty());
        assert_eq!(f.converter.calls(), vec!["x".to_string()]);
    }

    #[tokio::test]
    async fn test_copy_click_flow() {
        let f = fixture("**a__", false);
        f.pipeline.start();
        f.spawner.run_all().await;

        f.pipeline.on_copy();
        f.spawner.run_all().await;

        assert_eq!(f.clipboard.contents().as_deref(), Some("[* a]"));
        assert_eq!(f.copy_button.label(), "Copied!");
        assert!(f.copy_button.has_marker("copied"));

        f.clock.advance(Duration::from_millis(2000));
        assert_eq!(f.copy_button.label(), "Copy");
    }

    #[tokio::test]
    async fn test_copy_failure_keeps_label() {
        let f = fixture("text", false);
        f.pipeline.start();
        f.spawner.run_all().await;
        f.clipboard.set_failing(true);

        f.pipeline.on_copy();
        f.spawner.run_all().await;

        assert_eq!(f.copy_button.label(), "Copy");
        assert!(!f.pipeline.copy_feedback().state().is_active());
    }

    #[test]
    fn test_remove_parens_click_flow() {
        let f = fixture("", false);
        f.output.set_text("[page]() and ()");

        assert!(f.pipeline.on_remove_parens());
        assert_eq!(f.output.text(), "[page] and ");
        assert_eq!(f.remove_button.label(), "Removed!");

        f.clock.advance(Duration::from_millis(1000));
        assert!(f.pipeline.on_remove_parens());
        f.clock.advance(Duration::from_millis(1500));
        assert_eq!(f.remove_button.label(), "Removed!");
        f.clock.advance(Duration::from_millis(500));
        assert_eq!(f.remove_button.label(), "Remove ()");
    }

    #[test]
    fn test_toggle_theme_round_trip() {
        let f = fixture("", false);
        f.pipeline.start();
        assert_eq!(f.pipeline.theme(), Theme::Light);

        assert_eq!(f.pipeline.on_toggle_theme(), Theme::Dark);
        assert_eq!(f.store.get("theme").as_deref(), Some("dark"));
        assert_eq!(f.pipeline.on_toggle_theme(), Theme::Light);
        assert_eq!(f.store.get("theme").as_deref(), Some("light"));
        assert_eq!(f.marker.current().as_deref(), Some("light"));
    }

    #[test]
    fn test_drop_cancels_all_timers() {
        let f = fixture("", false);
        f.output.set_text("()");
        type_text(&f, "pending");
        f.pipeline.on_remove_parens();
        assert_eq!(f.clock.pending(), 2);

        let Fixture { clock, pipeline, .. } = f;
        drop(pipeline);

        assert_eq!(clock.pending(), 0);
    }
}
