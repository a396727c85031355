//! Success dialog with auto-close countdown

use std::time::Duration;

use tracing::debug;

use crate::timers::{TimerHost, TimerKind};

const TICK: Duration = Duration::from_secs(1);

/// Why the dialog closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    OkButton,
    Backdrop,
    Escape,
    Expired,
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Open {
        staff_id: String,
        timestamp: String,
        /// Seconds until the dialog closes itself
        remaining: u32,
    },
}

/// Modal shown after a successful submission.
///
/// While open it owns exactly one countdown interval. Every path out of
/// the open state goes through [`SuccessDialog::close`], which cancels
/// that interval once.
#[derive(Debug)]
pub struct SuccessDialog<Handle> {
    state: DialogState,
    auto_close_secs: u32,
    ticker: Option<Handle>,
}

impl<Handle> SuccessDialog<Handle> {
    pub fn new(auto_close_secs: u32) -> Self {
        Self {
            state: DialogState::Closed,
            auto_close_secs,
            ticker: None,
        }
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Open { .. })
    }

    pub fn remaining(&self) -> Option<u32> {
        match self.state {
            DialogState::Open { remaining, .. } => Some(remaining),
            DialogState::Closed => None,
        }
    }

    /// Show the dialog and start the countdown. Reopening while open
    /// replaces the old countdown.
    pub fn open<H>(&mut self, timers: &mut H, staff_id: String, timestamp: String)
    where
        H: TimerHost<Handle = Handle>,
    {
        self.stop_ticker(timers);
        debug!(
            "Success dialog opened, closing in {}s",
            self.auto_close_secs
        );
        self.state = DialogState::Open {
            staff_id,
            timestamp,
            remaining: self.auto_close_secs,
        };
        self.ticker = Some(timers.start_interval(TimerKind::DialogCountdown, TICK));
    }

    /// One countdown second elapsed. Returns true if this tick closed the
    /// dialog. Ticks arriving after close are ignored.
    pub fn tick<H>(&mut self, timers: &mut H) -> bool
    where
        H: TimerHost<Handle = Handle>,
    {
        let DialogState::Open { remaining, .. } = &mut self.state else {
            return false;
        };
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            self.close(timers, CloseReason::Expired)
        } else {
            false
        }
    }

    /// Hide the dialog. Returns false if it was already closed.
    pub fn close<H>(&mut self, timers: &mut H, reason: CloseReason) -> bool
    where
        H: TimerHost<Handle = Handle>,
    {
        self.stop_ticker(timers);
        if !self.is_open() {
            return false;
        }
        debug!("Success dialog closed ({:?})", reason);
        self.state = DialogState::Closed;
        true
    }

    fn stop_ticker<H>(&mut self, timers: &mut H)
    where
        H: TimerHost<Handle = Handle>,
    {
        if let Some(handle) = self.ticker.take() {
            timers.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timers::testing::ManualTimers;

    fn open_dialog(timers: &mut ManualTimers, secs: u32) -> SuccessDialog<u32> {
        let mut dialog = SuccessDialog::new(secs);
        dialog.open(timers, "12345".to_string(), "19/10/2569 10:00:00".to_string());
        dialog
    }

    #[test]
    fn test_countdown_closes_after_thirty_ticks() {
        let mut timers = ManualTimers::default();
        let mut dialog = open_dialog(&mut timers, 30);
        assert_eq!(dialog.remaining(), Some(30));
        assert_eq!(timers.started[0].period, Duration::from_secs(1));
        assert!(timers.started[0].repeating);

        for expected in (1..30).rev() {
            assert!(!dialog.tick(&mut timers));
            assert_eq!(dialog.remaining(), Some(expected));
        }
        assert!(dialog.tick(&mut timers));

        assert!(!dialog.is_open());
        assert_eq!(timers.cancelled, vec![1]);
    }

    #[test]
    fn test_stale_tick_after_close_is_ignored() {
        let mut timers = ManualTimers::default();
        let mut dialog = open_dialog(&mut timers, 30);

        assert!(dialog.close(&mut timers, CloseReason::OkButton));
        assert!(!dialog.tick(&mut timers));
        assert!(!dialog.close(&mut timers, CloseReason::Escape));

        assert_eq!(timers.cancelled, vec![1]);
    }

    #[test]
    fn test_reopen_replaces_countdown() {
        let mut timers = ManualTimers::default();
        let mut dialog = open_dialog(&mut timers, 30);
        dialog.tick(&mut timers);

        dialog.open(&mut timers, "54321".to_string(), "later".to_string());

        assert_eq!(dialog.remaining(), Some(30));
        assert_eq!(timers.cancelled, vec![1]);
        assert_eq!(timers.active_of(TimerKind::DialogCountdown), 1);
    }

    #[test]
    fn test_zero_seconds_closes_on_first_tick() {
        let mut timers = ManualTimers::default();
        let mut dialog = open_dialog(&mut timers, 0);
        assert!(dialog.tick(&mut timers));
        assert!(!dialog.is_open());
    }
}
