//! Owned, cancellable timers.
//!
//! The debouncer and the feedback controllers each hold at most one
//! pending [`TimerHandle`]. Cancelling is an explicit operation on the
//! handle; replacing a handle never implicitly cancels anything.

use std::rc::Rc;

use web_time::{Duration, Instant};

/// A scheduled callback that has not necessarily fired yet.
pub trait TimerHandle {
    /// Cancel the callback. A no-op if it already fired.
    fn cancel(self);
}

/// Source of time and one-shot timers.
pub trait TimerPlatform {
    type Handle: TimerHandle;

    /// Current instant on this platform's clock.
    fn now(&self) -> Instant;

    /// Run `callback` once after `delay`.
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

impl<T: TimerPlatform + ?Sized> TimerPlatform for Rc<T> {
    type Handle = T::Handle;

    fn now(&self) -> Instant {
        (**self).now()
    }

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle {
        (**self).schedule(delay, callback)
    }
}
