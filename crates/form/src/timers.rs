//! Host timer abstraction
//!
//! The form never talks to `setTimeout`/`setInterval` directly. It asks a
//! [`TimerHost`] for timers, keeps the returned handle, and the host calls
//! back into the controller with the [`TimerKind`] when one fires.

use std::time::Duration;

/// What a timer is for; delivered back to the controller when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// One-second tick of the success dialog countdown
    DialogCountdown,
    /// Quiet period after the last canvas resize
    ResizeDebounce,
}

pub trait TimerHost {
    /// Opaque cancellation token. Not `Clone`: whoever holds it owns the
    /// right to cancel.
    type Handle;

    /// Fire `kind` every `period` until cancelled
    fn start_interval(&mut self, kind: TimerKind, period: Duration) -> Self::Handle;

    /// Fire `kind` once after `delay`
    fn start_timeout(&mut self, kind: TimerKind, delay: Duration) -> Self::Handle;

    /// Stop the timer and release its resources. Also called for a timeout
    /// that has already fired.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Collapse a burst of triggers into one delivery after a quiet period
#[derive(Debug)]
pub struct Debouncer<T, Handle> {
    kind: TimerKind,
    delay: Duration,
    pending: Option<T>,
    handle: Option<Handle>,
}

impl<T, Handle> Debouncer<T, Handle> {
    pub fn new(kind: TimerKind, delay: Duration) -> Self {
        Self {
            kind,
            delay,
            pending: None,
            handle: None,
        }
    }

    /// Replace the pending value and restart the quiet period
    pub fn trigger<H>(&mut self, timers: &mut H, value: T)
    where
        H: TimerHost<Handle = Handle>,
    {
        if let Some(handle) = self.handle.take() {
            timers.cancel(handle);
        }
        self.pending = Some(value);
        self.handle = Some(timers.start_timeout(self.kind, self.delay));
    }

    /// The quiet period elapsed: hand out the latest value
    pub fn fire<H>(&mut self, timers: &mut H) -> Option<T>
    where
        H: TimerHost<Handle = Handle>,
    {
        if let Some(handle) = self.handle.take() {
            timers.cancel(handle);
        }
        self.pending.take()
    }

    /// Drop the pending value without delivering it
    pub fn cancel<H>(&mut self, timers: &mut H)
    where
        H: TimerHost<Handle = Handle>,
    {
        if let Some(handle) = self.handle.take() {
            timers.cancel(handle);
        }
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ManualTimers;
    use super::*;

    #[test]
    fn test_debounce_restarts_quiet_period() {
        let mut timers = ManualTimers::default();
        let mut debouncer = Debouncer::new(TimerKind::ResizeDebounce, Duration::from_millis(100));

        debouncer.trigger(&mut timers, 1);
        debouncer.trigger(&mut timers, 2);
        debouncer.trigger(&mut timers, 3);

        assert_eq!(timers.started.len(), 3);
        assert_eq!(timers.cancelled, vec![1, 2]);
        assert_eq!(timers.active_of(TimerKind::ResizeDebounce), 1);

        assert_eq!(debouncer.fire(&mut timers), Some(3));
        assert_eq!(timers.active_of(TimerKind::ResizeDebounce), 0);
        assert_eq!(debouncer.fire(&mut timers), None);
    }

    #[test]
    fn test_debounce_cancel_drops_value() {
        let mut timers = ManualTimers::default();
        let mut debouncer = Debouncer::new(TimerKind::ResizeDebounce, Duration::from_millis(100));

        debouncer.trigger(&mut timers, "a");
        assert!(debouncer.is_pending());
        debouncer.cancel(&mut timers);

        assert!(!debouncer.is_pending());
        assert_eq!(timers.cancelled, vec![1]);
        assert_eq!(debouncer.fire(&mut timers), None);
    }
}
