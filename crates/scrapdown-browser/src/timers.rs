//! `setTimeout`-backed timers and the local task spawner.

use futures_util::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;
use scrapdown_core::{Duration, Instant, Spawner, TimerHandle, TimerPlatform};

/// Timers on the page's event loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

/// Pending `setTimeout`. Dropping it also clears the timeout.
pub struct BrowserTimer(Timeout);

impl TimerHandle for BrowserTimer {
    fn cancel(self) {
        // Returns the never-run closure; dropping it frees it.
        drop(self.0.cancel());
    }
}

impl TimerPlatform for BrowserTimers {
    type Handle = BrowserTimer;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> BrowserTimer {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        BrowserTimer(Timeout::new(millis, callback))
    }
}

/// Spawns onto the microtask queue via `wasm_bindgen_futures`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSpawner;

impl Spawner for LocalSpawner {
    fn spawn_local(&self, fut: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(fut);
    }
}
