//! Submission flow for the form controller

use std::cell::RefCell;

use chrono::{DateTime, Local, TimeZone};
use readsign_ipc::{FieldId, FormSnapshot, SubmitReceipt};
use tracing::{debug, info, warn};

use crate::backend::{SubmitBackend, SubmitError};
use crate::rules::check_business_rules;
use crate::status::StatusMessage;
use crate::timers::TimerHost;
use crate::timestamp::format_timestamp;

use super::{Effect, FormController};

/// Result of [`FormController::begin_submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// A submission is already in flight
    Ignored,
    /// Stopped before the remote call; apply the effects and re-render
    Blocked(Vec<Effect>),
    /// Hand the snapshot to the backend, then call `complete_submit`
    Ready(FormSnapshot),
}

/// How a [`run_submission`] call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored,
    Blocked,
    Succeeded,
    Failed,
}

impl<H: TimerHost> FormController<H> {
    /// Validate, mark the form busy, then assemble and rule-check the
    /// snapshot. Any failure after the busy step clears it again.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.released {
            debug!("Submit ignored after teardown");
            return SubmitStart::Ignored;
        }
        if self.is_busy() {
            debug!("Submit ignored, previous submission still in flight");
            return SubmitStart::Ignored;
        }

        let report = self.revalidate();
        if !report.all_valid() {
            if !report.signature_present {
                self.validator.flag_missing_signature();
            }
            let effects = report
                .native
                .err()
                .map(Effect::ReportValidity)
                .into_iter()
                .collect();
            return SubmitStart::Blocked(effects);
        }

        self.in_flight = Some(self.fields.get(FieldId::StaffId).trim().to_string());
        self.status = Some(StatusMessage::info(
            self.config.messages.in_progress.clone(),
        ));
        self.revalidate();

        let signature_data = match self.pad.to_data_url() {
            Ok(url) => url,
            Err(e) => {
                warn!("Signature export failed: {}", e);
                return self.abort_submit(&e.to_string());
            }
        };
        let snapshot = self.fields.snapshot(signature_data);

        if let Err(violation) = check_business_rules(&snapshot) {
            debug!("Business rule failed: {}", violation);
            let message = violation.message(&self.config.messages).to_string();
            return self.abort_submit(&message);
        }

        info!(
            "Submitting signature for staff {} ({} byte signature)",
            snapshot.staff_id,
            snapshot.signature_data.len()
        );
        SubmitStart::Ready(snapshot)
    }

    /// Apply the backend's answer and clear the busy state
    pub fn complete_submit<Tz: TimeZone>(
        &mut self,
        result: Result<SubmitReceipt, SubmitError>,
        now: &DateTime<Tz>,
    ) -> Vec<Effect> {
        let Some(staff_id) = self.in_flight.take() else {
            warn!("Submission result arrived with nothing in flight");
            return Vec::new();
        };
        if self.released {
            debug!("Submission for staff {} finished after teardown", staff_id);
            return Vec::new();
        }

        let mut effects = Vec::new();
        match result {
            Ok(receipt) if receipt.ok => {
                info!(
                    "Submission accepted for staff {} (server time {:?})",
                    staff_id, receipt.timestamp
                );
                let timestamp = format_timestamp(now, self.config.locale.buddhist_era);
                self.fields.reset();
                self.pad.clear();
                self.validator.clear_signature_marks();
                self.status = None;
                self.dialog.open(&mut self.timers, staff_id, timestamp);
                effects.extend([Effect::ResetForm, Effect::RepaintCanvas, Effect::FocusDialogOk]);
            }
            Ok(_) => {
                warn!("Backend answered without ok");
                self.status = Some(StatusMessage::error(self.config.messages.error_line("")));
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                self.status = Some(StatusMessage::error(
                    self.config.messages.error_line(&e.to_string()),
                ));
            }
        }

        self.revalidate();
        effects
    }

    fn abort_submit(&mut self, message: &str) -> SubmitStart {
        self.in_flight = None;
        self.status = Some(StatusMessage::error(self.config.messages.error_line(message)));
        self.revalidate();
        SubmitStart::Blocked(Vec::new())
    }
}

/// Drive one submission end to end.
///
/// `on_change` runs after each state change (busy, then result) with the
/// effects to apply. The controller is only borrowed between awaits, so
/// page events keep flowing while the backend works.
pub async fn run_submission<H, B, F>(
    form: &RefCell<FormController<H>>,
    backend: &B,
    mut on_change: F,
) -> SubmitOutcome
where
    H: TimerHost,
    B: SubmitBackend,
    F: FnMut(&[Effect]),
{
    let start = form.borrow_mut().begin_submit();
    let snapshot = match start {
        SubmitStart::Ignored => return SubmitOutcome::Ignored,
        SubmitStart::Blocked(effects) => {
            on_change(&effects);
            return SubmitOutcome::Blocked;
        }
        SubmitStart::Ready(snapshot) => snapshot,
    };
    on_change(&[]);

    let result = backend.submit(snapshot).await;
    let accepted = matches!(&result, Ok(receipt) if receipt.ok);

    let effects = form.borrow_mut().complete_submit(result, &Local::now());
    on_change(&effects);

    if accepted {
        SubmitOutcome::Succeeded
    } else {
        SubmitOutcome::Failed
    }
}
