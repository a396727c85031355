//! Widget instance: pad, fields, validator, dialog and submission state
//!
//! Hosts feed [`WidgetEvent`]s and timer firings in, apply the returned
//! [`Effect`]s and re-render from [`FormController::view`].

mod submit;

pub use submit::{run_submission, SubmitOutcome, SubmitStart};

use std::time::Duration;

use readsign_config::{ConfigError, ReadSignConfig};
use readsign_ipc::{CanvasRect, WidgetEvent};
use readsign_pad::{SignaturePad, StrokeOutcome, StrokeStyle};
use tracing::{debug, info};

use crate::dialog::{CloseReason, DialogState, SuccessDialog};
use crate::fields::{ConstraintViolation, FormFields};
use crate::status::StatusMessage;
use crate::timers::{Debouncer, TimerHost, TimerKind};
use crate::validator::{FormValidator, Indicators, ValidationReport};

/// Imperative work for the host beyond re-rendering the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Whole pad changed (resize, clear, reset)
    RepaintCanvas,
    /// Only this device-pixel rectangle changed
    RepaintRegion {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// Surface the native constraint message (`reportValidity`)
    ReportValidity(ConstraintViolation),
    /// Reset the form controls to their initial values
    ResetForm,
    /// Move focus to the success dialog's OK button
    FocusDialogOk,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub detail: String,
    pub timer_text: String,
}

/// Everything the host renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub indicators: Indicators,
    pub status: Option<StatusMessage>,
    pub dialog: Option<DialogView>,
}

pub struct FormController<H: TimerHost> {
    config: ReadSignConfig,
    fields: FormFields,
    pad: SignaturePad,
    validator: FormValidator,
    dialog: SuccessDialog<H::Handle>,
    resize: Debouncer<(CanvasRect, f32), H::Handle>,
    status: Option<StatusMessage>,
    /// Staff id of the submission awaiting the backend
    in_flight: Option<String>,
    /// Set by [`FormController::teardown`]; no timer starts afterwards
    released: bool,
    timers: H,
}

impl<H: TimerHost> FormController<H> {
    pub fn new(config: &ReadSignConfig, timers: H) -> Result<Self, ConfigError> {
        let style = StrokeStyle::new(config.canvas.stroke_width, config.stroke_rgba()?);
        let mut controller = Self {
            config: config.clone(),
            fields: FormFields::new(),
            pad: SignaturePad::new(style),
            validator: FormValidator::new(),
            dialog: SuccessDialog::new(config.dialog.auto_close_secs),
            resize: Debouncer::new(
                TimerKind::ResizeDebounce,
                Duration::from_millis(config.resize_debounce_ms),
            ),
            status: None,
            in_flight: None,
            released: false,
            timers,
        };
        controller.revalidate();
        Ok(controller)
    }

    pub fn pad(&self) -> &SignaturePad {
        &self.pad
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn dialog(&self) -> &DialogState {
        self.dialog.state()
    }

    pub fn timers(&self) -> &H {
        &self.timers
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Apply one page event. Ignored after [`teardown`](Self::teardown).
    pub fn handle(&mut self, event: WidgetEvent) -> Vec<Effect> {
        if self.released {
            debug!("Event after teardown ignored: {:?}", event);
            return Vec::new();
        }
        match event {
            WidgetEvent::PenDown { input, rect } => {
                self.pad.pen_down(&input, &rect);
                Vec::new()
            }
            WidgetEvent::PenMove { input, rect } => match self.pad.pen_move(&input, &rect) {
                StrokeOutcome::Painted {
                    x,
                    y,
                    width,
                    height,
                } => {
                    self.validator.mark_signature_drawn();
                    vec![Effect::RepaintRegion {
                        x,
                        y,
                        width,
                        height,
                    }]
                }
                StrokeOutcome::Missed | StrokeOutcome::Ignored => Vec::new(),
            },
            WidgetEvent::PenUp | WidgetEvent::PenLeave | WidgetEvent::PenCancel => {
                self.pad.pen_up();
                self.revalidate();
                Vec::new()
            }
            WidgetEvent::ClearSignature => self.clear_signature(),
            WidgetEvent::FieldChanged { field, value } => {
                self.fields.set(field, value);
                self.revalidate();
                Vec::new()
            }
            WidgetEvent::ConsentChanged { consent, checked } => {
                self.fields.set_consent(consent, checked);
                self.revalidate();
                Vec::new()
            }
            WidgetEvent::ValidityChanged { valid } => {
                self.fields.set_page_validity(valid);
                self.revalidate();
                Vec::new()
            }
            WidgetEvent::DialogOk => self.close_dialog(CloseReason::OkButton),
            WidgetEvent::DialogBackdrop => self.close_dialog(CloseReason::Backdrop),
            WidgetEvent::KeyDown { key } => {
                if key == "Escape" && self.dialog.is_open() {
                    self.close_dialog(CloseReason::Escape)
                } else {
                    Vec::new()
                }
            }
            WidgetEvent::Resize {
                rect,
                device_pixel_ratio,
            } => {
                self.resize
                    .trigger(&mut self.timers, (rect, device_pixel_ratio));
                Vec::new()
            }
        }
    }

    /// A timer started through the host fired
    pub fn on_timer(&mut self, kind: TimerKind) -> Vec<Effect> {
        if self.released {
            return Vec::new();
        }
        match kind {
            TimerKind::DialogCountdown => {
                self.dialog.tick(&mut self.timers);
                Vec::new()
            }
            TimerKind::ResizeDebounce => match self.resize.fire(&mut self.timers) {
                Some((rect, dpr)) => self.setup_canvas(rect, dpr),
                None => Vec::new(),
            },
        }
    }

    /// Fit the pad to the canvas immediately. Used once layout has settled
    /// and after a debounced resize; erases the drawing.
    pub fn setup_canvas(&mut self, rect: CanvasRect, device_pixel_ratio: f32) -> Vec<Effect> {
        self.pad.resize(rect.width, rect.height, device_pixel_ratio);
        self.validator.clear_signature_marks();
        self.revalidate();
        vec![Effect::RepaintCanvas]
    }

    /// Erase the pad and every signature mark
    pub fn clear_signature(&mut self) -> Vec<Effect> {
        self.pad.clear();
        self.validator.clear_signature_marks();
        self.revalidate();
        debug!("Signature cleared");
        vec![Effect::RepaintCanvas]
    }

    /// Recompute indicators and submit gating
    pub fn revalidate(&mut self) -> ValidationReport {
        let busy = self.is_busy();
        self.validator.validate(&self.fields, &self.pad, busy)
    }

    pub fn view(&self) -> FormView {
        let messages = &self.config.messages;
        let dialog = match self.dialog.state() {
            DialogState::Open {
                staff_id,
                timestamp,
                remaining,
            } => Some(DialogView {
                detail: messages.success_detail(staff_id, timestamp),
                timer_text: messages.auto_close(*remaining),
            }),
            DialogState::Closed => None,
        };

        FormView {
            indicators: self.validator.indicators(),
            status: self.status.clone(),
            dialog,
        }
    }

    /// Cancel every pending timer and detach from the page: later events,
    /// timer firings and submissions are ignored.
    pub fn teardown(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.dialog.close(&mut self.timers, CloseReason::Teardown);
        self.resize.cancel(&mut self.timers);
        info!("Read & Sign timers released");
    }

    fn close_dialog(&mut self, reason: CloseReason) -> Vec<Effect> {
        self.dialog.close(&mut self.timers, reason);
        Vec::new()
    }
}

impl<H: TimerHost> Drop for FormController<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::timers::testing::ManualTimers;
    use readsign_ipc::{Consent, FieldId, PointerInput};

    pub const RECT: CanvasRect = CanvasRect {
        left: 20.0,
        top: 40.0,
        width: 300.0,
        height: 150.0,
    };

    pub fn controller() -> FormController<ManualTimers> {
        let mut form = FormController::new(&ReadSignConfig::default(), ManualTimers::default())
            .expect("default config is valid");
        form.setup_canvas(RECT, 2.0);
        form
    }

    pub fn sign(form: &mut FormController<ManualTimers>) {
        form.handle(WidgetEvent::PenDown {
            input: PointerInput::mouse(60.0, 80.0),
            rect: RECT,
        });
        form.handle(WidgetEvent::PenMove {
            input: PointerInput::mouse(120.0, 110.0),
            rect: RECT,
        });
        form.handle(WidgetEvent::PenUp);
    }

    pub fn fill(form: &mut FormController<ManualTimers>) {
        let values = [
            (FieldId::FirstName, " Somchai "),
            (FieldId::LastName, "Jaidee"),
            (FieldId::StaffId, "12345"),
            (FieldId::Position, "Technician"),
            (FieldId::Division, "Operations"),
            (FieldId::Department, "Maintenance"),
            (FieldId::Section, "Line"),
            (FieldId::Location, "UTP"),
        ];
        for (field, value) in values {
            form.handle(WidgetEvent::FieldChanged {
                field,
                value: value.to_string(),
            });
        }
        for consent in [Consent::Read, Consent::Privacy] {
            form.handle(WidgetEvent::ConsentChanged {
                consent,
                checked: true,
            });
        }
    }

    pub fn ready() -> FormController<ManualTimers> {
        let mut form = controller();
        fill(&mut form);
        sign(&mut form);
        form
    }
}
