//! Trailing-edge debounce.
//!
//! A [`Debouncer`] wraps an action and a delay. Every [`Debouncer::trigger`]
//! cancels the previously scheduled fire and schedules a new one, so the
//! action runs once per burst, `delay` after the last trigger, with the
//! last trigger's argument. There is no leading-edge fire.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use web_time::Duration;

use crate::timer::{TimerHandle, TimerPlatform};

struct DebounceState<P: TimerPlatform, T> {
    timers: P,
    delay: Duration,
    action: RefCell<Box<dyn FnMut(T)>>,
    pending: RefCell<Option<P::Handle>>,
}

impl<P: TimerPlatform, T> Drop for DebounceState<P, T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.cancel();
        }
    }
}

/// Rate-limits calls to an action to one per quiet period.
///
/// Dropping the debouncer cancels any pending fire.
pub struct Debouncer<P: TimerPlatform, T> {
    state: Rc<DebounceState<P, T>>,
}

impl<P, T> Debouncer<P, T>
where
    P: TimerPlatform + 'static,
    T: 'static,
{
    pub fn new(timers: P, delay: Duration, action: impl FnMut(T) + 'static) -> Self {
        Self {
            state: Rc::new(DebounceState {
                timers,
                delay,
                action: RefCell::new(Box::new(action)),
                pending: RefCell::new(None),
            }),
        }
    }

    /// Request a fire with `arg`, superseding any pending one.
    pub fn trigger(&self, arg: T) {
        self.cancel();

        let weak: Weak<DebounceState<P, T>> = Rc::downgrade(&self.state);
        let handle = self.state.timers.schedule(
            self.state.delay,
            Box::new(move || {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                // Clear before running so the action may re-trigger.
                drop(state.pending.borrow_mut().take());
                tracing::trace!("debounce fired");
                let mut action = state.action.borrow_mut();
                (*action)(arg);
            }),
        );
        *self.state.pending.borrow_mut() = Some(handle);
    }

    /// Drop the pending fire, if any.
    pub fn cancel(&self) {
        let previous = self.state.pending.borrow_mut().take();
        if let Some(handle) = previous {
            handle.cancel();
        }
    }

    /// Is a fire currently scheduled?
    pub fn is_pending(&self) -> bool {
        self.state.pending.borrow().is_some()
    }

    pub fn delay(&self) -> Duration {
        self.state.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualClock;

    fn recording_debouncer(clock: &ManualClock) -> (Debouncer<ManualClock, u32>, Rc<RefCell<Vec<u32>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let debouncer = Debouncer::new(clock.clone(), Duration::from_millis(300), move |n| {
            sink.borrow_mut().push(n)
        });
        (debouncer, calls)
    }

    #[test]
    fn test_burst_collapses_to_last_argument() {
        let clock = ManualClock::new();
        let (debouncer, calls) = recording_debouncer(&clock);

        for n in 1..=5 {
            debouncer.trigger(n);
            clock.advance(Duration::from_millis(100));
        }
        assert!(calls.borrow().is_empty());

        clock.advance(Duration::from_millis(300));
        assert_eq!(*calls.borrow(), vec![5]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_no_leading_edge_fire() {
        let clock = ManualClock::new();
        let (debouncer, calls) = recording_debouncer(&clock);

        debouncer.trigger(1);
        assert!(calls.borrow().is_empty());
        clock.advance(Duration::from_millis(299));
        assert!(calls.borrow().is_empty());
        clock.advance(Duration::from_millis(1));
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[test]
    fn test_separate_bursts_fire_separately() {
        let clock = ManualClock::new();
        let (debouncer, calls) = recording_debouncer(&clock);

        debouncer.trigger(1);
        clock.advance(Duration::from_millis(400));
        debouncer.trigger(2);
        debouncer.trigger(3);
        clock.advance(Duration::from_millis(400));

        assert_eq!(*calls.borrow(), vec![1, 3]);
    }

    #[test]
    fn test_cancel_drops_pending_fire() {
        let clock = ManualClock::new();
        let (debouncer, calls) = recording_debouncer(&clock);

        debouncer.trigger(1);
        assert!(debouncer.is_pending());
        debouncer.cancel();
        clock.advance(Duration::from_secs(1));

        assert!(calls.borrow().is_empty());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_drop_cancels_pending_fire() {
        let clock = ManualClock::new();
        let (debouncer, calls) = recording_debouncer(&clock);

        debouncer.trigger(7);
        drop(debouncer);
        clock.advance(Duration::from_secs(1));

        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_instances_are_independent() {
        let clock = ManualClock::new();
        let (a, a_calls) = recording_debouncer(&clock);
        let (b, b_calls) = recording_debouncer(&clock);

        a.trigger(1);
        clock.advance(Duration::from_millis(200));
        b.trigger(2);
        clock.advance(Duration::from_millis(100));

        assert_eq!(*a_calls.borrow(), vec![1]);
        assert!(b_calls.borrow().is_empty());

        clock.advance(Duration::from_millis(200));
        assert_eq!(*b_calls.borrow(), vec![2]);
    }
}
