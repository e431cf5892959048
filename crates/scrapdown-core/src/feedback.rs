//! Timed, auto-reverting button feedback.
//!
//! A [`FeedbackController`] flips a button to its active label and marker
//! class, then reverts after a fixed delay. Triggering again while active
//! cancels the pending revert and schedules a fresh one, so the button
//! stays active continuously and reverts once, timed from the last
//! trigger.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use web_time::{Duration, Instant};

use crate::platform::Affordance;
use crate::timer::{TimerHandle, TimerPlatform};

/// Default time a button stays in its active state.
pub const DEFAULT_REVERT: Duration = Duration::from_millis(2000);

/// Idle and active presentation of a feedback button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackLabels {
    pub idle: SmolStr,
    pub active: SmolStr,
    /// Class added while active.
    pub marker: SmolStr,
}

impl FeedbackLabels {
    pub fn new(idle: &str, active: &str, marker: &str) -> Self {
        Self {
            idle: idle.into(),
            active: active.into(),
            marker: marker.into(),
        }
    }

    /// "Copy" button.
    pub fn copy() -> Self {
        Self::new("Copy", "Copied!", "copied")
    }

    /// "Remove ()" button.
    pub fn remove_parens() -> Self {
        Self::new("Remove ()", "Removed!", "removed")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackState {
    Idle,
    Active { expires_at: Instant },
}

impl FeedbackState {
    pub fn is_active(&self) -> bool {
        matches!(self, FeedbackState::Active { .. })
    }
}

struct FeedbackInner<P: TimerPlatform, A> {
    timers: P,
    affordance: A,
    labels: FeedbackLabels,
    revert_after: Duration,
    state: Cell<FeedbackState>,
    pending: RefCell<Option<P::Handle>>,
}

impl<P: TimerPlatform, A: Affordance> FeedbackInner<P, A> {
    fn revert(&self) {
        drop(self.pending.borrow_mut().take());
        self.affordance.set_label(&self.labels.idle);
        self.affordance.set_marker(&self.labels.marker, false);
        self.state.set(FeedbackState::Idle);
        tracing::debug!(label = %self.labels.idle, "feedback reverted");
    }
}

impl<P: TimerPlatform, A> Drop for FeedbackInner<P, A> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.cancel();
        }
    }
}

/// One button's feedback state machine.
///
/// Instances are independent; each owns at most one pending revert.
pub struct FeedbackController<P: TimerPlatform, A> {
    inner: Rc<FeedbackInner<P, A>>,
}

impl<P, A> FeedbackController<P, A>
where
    P: TimerPlatform + 'static,
    A: Affordance + 'static,
{
    pub fn new(timers: P, affordance: A, labels: FeedbackLabels, revert_after: Duration) -> Self {
        Self {
            inner: Rc::new(FeedbackInner {
                timers,
                affordance,
                labels,
                revert_after,
                state: Cell::new(FeedbackState::Idle),
                pending: RefCell::new(None),
            }),
        }
    }

    /// Show the active state and (re)start the revert timer.
    pub fn trigger(&self) {
        let inner = &self.inner;
        let previous = inner.pending.borrow_mut().take();
        if let Some(handle) = previous {
            handle.cancel();
        }

        inner.affordance.set_label(&inner.labels.active);
        inner.affordance.set_marker(&inner.labels.marker, true);

        let expires_at = inner.timers.now() + inner.revert_after;
        inner.state.set(FeedbackState::Active { expires_at });

        let weak: Weak<FeedbackInner<P, A>> = Rc::downgrade(inner);
        let handle = inner.timers.schedule(
            inner.revert_after,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.revert();
                }
            }),
        );
        *inner.pending.borrow_mut() = Some(handle);
        tracing::debug!(label = %inner.labels.active, "feedback shown");
    }

    pub fn state(&self) -> FeedbackState {
        self.inner.state.get()
    }

    pub fn labels(&self) -> &FeedbackLabels {
        &self.inner.labels
    }

    pub fn affordance(&self) -> &A {
        &self.inner.affordance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualClock, MemoryAffordance};

    fn copy_controller(
        clock: &ManualClock,
    ) -> (FeedbackController<ManualClock, MemoryAffordance>, MemoryAffordance) {
        let button = MemoryAffordance::new("Copy");
        let controller = FeedbackController::new(
            clock.clone(),
            button.clone(),
            FeedbackLabels::copy(),
            DEFAULT_REVERT,
        );
        (controller, button)
    }

    #[test]
    fn test_trigger_then_revert() {
        let clock = ManualClock::new();
        let (controller, button) = copy_controller(&clock);

        controller.trigger();
        assert_eq!(button.label(), "Copied!");
        assert!(button.has_marker("copied"));
        assert!(controller.state().is_active());

        clock.advance(Duration::from_millis(1999));
        assert_eq!(button.label(), "Copied!");

        clock.advance(Duration::from_millis(1));
        assert_eq!(button.label(), "Copy");
        assert!(!button.has_marker("copied"));
        assert_eq!(controller.state(), FeedbackState::Idle);
    }

    #[test]
    fn test_retrigger_restarts_timer_without_flicker() {
        let clock = ManualClock::new();
        let (controller, button) = copy_controller(&clock);

        controller.trigger();
        clock.advance(Duration::from_millis(1500));
        controller.trigger();

        // The first trigger's revert would have landed here.
        clock.advance(Duration::from_millis(1000));
        assert_eq!(button.label(), "Copied!");
        assert!(button.has_marker("copied"));

        clock.advance(Duration::from_millis(1000));
        assert_eq!(button.label(), "Copy");
        assert_eq!(button.label_history(), vec!["Copied!", "Copied!", "Copy"]);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_expiry_tracks_latest_trigger() {
        let clock = ManualClock::new();
        let (controller, _button) = copy_controller(&clock);

        controller.trigger();
        clock.advance(Duration::from_millis(500));
        let now = clock.now();
        controller.trigger();

        assert_eq!(
            controller.state(),
            FeedbackState::Active {
                expires_at: now + DEFAULT_REVERT
            }
        );
    }

    #[test]
    fn test_controllers_are_independent() {
        let clock = ManualClock::new();
        let (copy, copy_button) = copy_controller(&clock);
        let remove_button = MemoryAffordance::new("Remove ()");
        let remove = FeedbackController::new(
            clock.clone(),
            remove_button.clone(),
            FeedbackLabels::remove_parens(),
            DEFAULT_REVERT,
        );

        copy.trigger();
        clock.advance(Duration::from_millis(1000));
        remove.trigger();
        clock.advance(Duration::from_millis(1000));

        assert_eq!(copy_button.label(), "Copy");
        assert_eq!(remove_button.label(), "Removed!");
        assert!(remove_button.has_marker("removed"));

        clock.advance(Duration::from_millis(1000));
        assert_eq!(remove_button.label(), "Remove ()");
    }

    #[test]
    fn test_drop_cancels_revert() {
        let clock = ManualClock::new();
        let (controller, button) = copy_controller(&clock);

        controller.trigger();
        drop(controller);
        clock.advance(DEFAULT_REVERT);

        assert_eq!(clock.pending(), 0);
        assert_eq!(button.label(), "Copied!");
    }
}
