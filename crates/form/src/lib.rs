//! Read & Sign form logic
//!
//! Host-independent state for the signing form:
//! - [`fields`] - Field values and native (required) constraints
//! - [`rules`] - Business rules checked on the submitted snapshot
//! - [`validator`] - Submit gating and warning indicators
//! - [`timers`] - Host timer abstraction and resize debouncing
//! - [`dialog`] - Auto-closing success dialog
//! - [`backend`] - The remote submission capability
//! - [`controller`] - [`FormController`], the widget instance tying it all together

pub mod backend;
pub mod controller;
pub mod dialog;
pub mod fields;
pub mod rules;
pub mod status;
pub mod timers;
pub mod timestamp;
pub mod validator;

pub use backend::{SubmitBackend, SubmitError};
pub use controller::{
    run_submission, DialogView, Effect, FormController, FormView, SubmitOutcome, SubmitStart,
};
pub use dialog::{CloseReason, DialogState, SuccessDialog};
pub use fields::{ConstraintViolation, FormFields};
pub use rules::{check_business_rules, is_valid_staff_id, RuleViolation};
pub use status::{StatusKind, StatusMessage};
pub use timers::{Debouncer, TimerHost, TimerKind};
pub use timestamp::format_timestamp;
pub use validator::{FormValidator, Indicators, ValidationReport};
