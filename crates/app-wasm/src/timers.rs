//! `setTimeout`/`setInterval` backed timer host

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use readsign_form::{TimerHost, TimerKind};
use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::App;

/// Browser timer id plus which clear function releases it
#[derive(Debug)]
pub struct BrowserTimer {
    id: i32,
    repeating: bool,
}

/// One long-lived JS callback per [`TimerKind`]. At most one timer of each
/// kind runs at a time, so callbacks are reused and never freed while a
/// timer could still call them.
pub struct BrowserTimers {
    window: Window,
    target: Rc<RefCell<Weak<App>>>,
    dialog_tick: Closure<dyn FnMut()>,
    resize_settled: Closure<dyn FnMut()>,
}

impl BrowserTimers {
    pub fn new(window: Window) -> Self {
        let target = Rc::new(RefCell::new(Weak::new()));
        Self {
            window,
            dialog_tick: deliver(&target, TimerKind::DialogCountdown),
            resize_settled: deliver(&target, TimerKind::ResizeDebounce),
            target,
        }
    }

    /// Route timer firings to `app`
    pub fn bind(&self, app: Weak<App>) {
        *self.target.borrow_mut() = app;
    }

    fn callback(&self, kind: TimerKind) -> &js_sys::Function {
        let closure = match kind {
            TimerKind::DialogCountdown => &self.dialog_tick,
            TimerKind::ResizeDebounce => &self.resize_settled,
        };
        closure.as_ref().unchecked_ref()
    }
}

fn deliver(target: &Rc<RefCell<Weak<App>>>, kind: TimerKind) -> Closure<dyn FnMut()> {
    let target = target.clone();
    Closure::<dyn FnMut()>::new(move || {
        let app = target.borrow().upgrade();
        if let Some(app) = app {
            app.on_timer(kind);
        }
    })
}

fn millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

impl TimerHost for BrowserTimers {
    type Handle = BrowserTimer;

    fn start_interval(&mut self, kind: TimerKind, period: Duration) -> BrowserTimer {
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                self.callback(kind),
                millis(period),
            )
            .unwrap_or_else(|e| {
                warn!("setInterval for {:?} failed: {:?}", kind, e);
                0
            });
        BrowserTimer {
            id,
            repeating: true,
        }
    }

    fn start_timeout(&mut self, kind: TimerKind, delay: Duration) -> BrowserTimer {
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.callback(kind),
                millis(delay),
            )
            .unwrap_or_else(|e| {
                warn!("setTimeout for {:?} failed: {:?}", kind, e);
                0
            });
        BrowserTimer {
            id,
            repeating: false,
        }
    }

    fn cancel(&mut self, timer: BrowserTimer) {
        if timer.repeating {
            self.window.clear_interval_with_handle(timer.id);
        } else {
            self.window.clear_timeout_with_handle(timer.id);
        }
    }
}
