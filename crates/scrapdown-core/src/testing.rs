//! Deterministic clock and in-memory port implementations.
//!
//! Available to this crate's tests and, with the `test-utils` feature, to
//! downstream crates that want to drive a [`Pipeline`](crate::Pipeline)
//! without a browser.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::rc::{Rc, Weak};

use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use web_time::{Duration, Instant};

use crate::convert::ConvertError;
use crate::platform::{
    Affordance, ClipboardPlatform, ColorSchemeQuery, Converter, PlatformError, PreferenceStore,
    Spawner, TextSlot, ThemeMarker,
};
use crate::theme::Theme;
use crate::timer::{TimerHandle, TimerPlatform};

type TimerKey = (Duration, u64);

struct ClockState {
    origin: Instant,
    elapsed: Duration,
    next_id: u64,
    queue: BTreeMap<TimerKey, Box<dyn FnOnce()>>,
}

/// A clock that only moves when told to.
///
/// Timers fire in due order during [`ManualClock::advance`]; timers
/// scheduled at the same instant fire in scheduling order.
#[derive(Clone)]
pub struct ManualClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ClockState {
                origin: Instant::now(),
                elapsed: Duration::ZERO,
                next_id: 0,
                queue: BTreeMap::new(),
            })),
        }
    }

    /// Move time forward, firing every timer that falls due.
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().elapsed + by;
        loop {
            let due = {
                let mut state = self.state.borrow_mut();
                let key = match state.queue.keys().next() {
                    Some(key) if key.0 <= target => *key,
                    _ => break,
                };
                state.elapsed = key.0;
                state.queue.remove(&key)
            };
            // Borrow released: callbacks may schedule or cancel.
            if let Some(callback) = due {
                callback();
            }
        }
        self.state.borrow_mut().elapsed = target;
    }

    /// Time since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.state.borrow().elapsed
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for a [`ManualClock`] timer.
pub struct ManualTimer {
    key: TimerKey,
    clock: Weak<RefCell<ClockState>>,
}

impl TimerHandle for ManualTimer {
    fn cancel(self) {
        if let Some(state) = self.clock.upgrade() {
            state.borrow_mut().queue.remove(&self.key);
        }
    }
}

impl TimerPlatform for ManualClock {
    type Handle = ManualTimer;

    fn now(&self) -> Instant {
        let state = self.state.borrow();
        state.origin + state.elapsed
    }

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> ManualTimer {
        let mut state = self.state.borrow_mut();
        let key = (state.elapsed + delay, state.next_id);
        state.next_id += 1;
        state.queue.insert(key, callback);
        ManualTimer {
            key,
            clock: Rc::downgrade(&self.state),
        }
    }
}

/// In-memory text field. Counts writes so tests can check the
/// one-write-per-conversion contract.
#[derive(Clone, Default)]
pub struct MemorySlot {
    text: Rc<RefCell<String>>,
    writes: Rc<Cell<usize>>,
}

impl MemorySlot {
    pub fn new(text: &str) -> Self {
        Self {
            text: Rc::new(RefCell::new(text.to_string())),
            writes: Rc::new(Cell::new(0)),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl TextSlot for MemorySlot {
    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
        self.writes.set(self.writes.get() + 1);
    }
}

/// In-memory button.
#[derive(Clone, Default)]
pub struct MemoryAffordance {
    label: Rc<RefCell<String>>,
    markers: Rc<RefCell<BTreeSet<String>>>,
    label_history: Rc<RefCell<Vec<String>>>,
}

impl MemoryAffordance {
    pub fn new(label: &str) -> Self {
        let this = Self::default();
        *this.label.borrow_mut() = label.to_string();
        this
    }

    pub fn label(&self) -> String {
        self.label.borrow().clone()
    }

    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.borrow().contains(marker)
    }

    /// Every label written, in order.
    pub fn label_history(&self) -> Vec<String> {
        self.label_history.borrow().clone()
    }
}

impl Affordance for MemoryAffordance {
    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.to_string();
        self.label_history.borrow_mut().push(label.to_string());
    }

    fn set_marker(&self, marker: &str, active: bool) {
        let mut markers = self.markers.borrow_mut();
        if active {
            markers.insert(marker.to_string());
        } else {
            markers.remove(marker);
        }
    }
}

/// In-memory key/value store that can be told to reject writes.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
    read_only: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        if self.read_only.get() {
            return Err("storage is read-only".into());
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Fixed OS color scheme answer.
#[derive(Clone, Copy, Default)]
pub struct FixedScheme {
    pub dark: bool,
}

impl ColorSchemeQuery for FixedScheme {
    fn prefers_dark(&self) -> bool {
        self.dark
    }
}

/// In-memory stand-in for the `data-theme` attribute.
#[derive(Clone, Default)]
pub struct MemoryMarker {
    value: Rc<RefCell<Option<String>>>,
}

impl MemoryMarker {
    pub fn with_raw(value: &str) -> Self {
        Self {
            value: Rc::new(RefCell::new(Some(value.to_string()))),
        }
    }
}

impl ThemeMarker for MemoryMarker {
    fn current(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    fn set(&self, theme: Theme) {
        *self.value.borrow_mut() = Some(theme.as_str().to_string());
    }
}

/// Converter backed by a synchronous function. Records every input.
#[derive(Clone)]
pub struct FnConverter {
    convert: Rc<dyn Fn(&str) -> Result<String, ConvertError>>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl FnConverter {
    pub fn new(convert: impl Fn(&str) -> Result<String, ConvertError> + 'static) -> Self {
        Self {
            convert: Rc::new(convert),
            calls: Rc::default(),
        }
    }

    /// Converter that always fails with `message`.
    pub fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::new(move |_| Err(ConvertError::new(message.clone())))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Converter for FnConverter {
    fn convert(&self, markdown: &str) -> LocalBoxFuture<'static, Result<String, ConvertError>> {
        self.calls.borrow_mut().push(markdown.to_string());
        let result = (self.convert)(markdown);
        async move { result }.boxed_local()
    }
}

/// Clipboard that records writes, or rejects them when `failing`.
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
    failing: Rc<Cell<bool>>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl ClipboardPlatform for MemoryClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), PlatformError>> {
        let result = if self.failing.get() {
            Err(PlatformError::from("clipboard permission denied"))
        } else {
            *self.contents.borrow_mut() = Some(text.to_string());
            Ok(())
        };
        async move { result }.boxed_local()
    }
}

/// Spawner that queues futures until [`QueuedSpawner::run_all`].
#[derive(Clone, Default)]
pub struct QueuedSpawner {
    queue: Rc<RefCell<VecDeque<LocalBoxFuture<'static, ()>>>>,
}

impl QueuedSpawner {
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Drive queued futures to completion, oldest first.
    pub async fn run_all(&self) {
        loop {
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(fut) => fut.await,
                None => break,
            }
        }
    }
}

impl Spawner for QueuedSpawner {
    fn spawn_local(&self, fut: LocalBoxFuture<'static, ()>) {
        self.queue.borrow_mut().push_back(fut);
    }
}
