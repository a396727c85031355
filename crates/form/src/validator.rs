//! Submit gating and warning indicators

use readsign_pad::SignaturePad;
use tracing::trace;

use crate::fields::{ConstraintViolation, FormFields};

/// Result of one validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    pub native: Result<(), ConstraintViolation>,
    pub signature_present: bool,
    pub consent_given: bool,
}

impl ValidationReport {
    pub fn all_valid(&self) -> bool {
        self.native.is_ok() && self.signature_present && self.consent_given
    }
}

/// Visual state the host mirrors onto the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indicators {
    /// `has-signature` on the canvas wrapper (placeholder hidden)
    pub has_signature_style: bool,
    /// `invalid` on the canvas wrapper
    pub signature_invalid: bool,
    /// Signature warning shown
    pub signature_warning: bool,
    /// Consent warning shown
    pub consent_warning: bool,
    pub submit_enabled: bool,
    /// Submit button in its loading state
    pub busy: bool,
}

/// Derives the indicators from the form, the pad and the busy flag.
///
/// [`FormValidator::validate`] is idempotent: calling it twice without a
/// state change in between leaves the indicators untouched.
#[derive(Debug, Default)]
pub struct FormValidator {
    indicators: Indicators,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indicators(&self) -> Indicators {
        self.indicators
    }

    pub fn validate(
        &mut self,
        fields: &FormFields,
        pad: &SignaturePad,
        busy: bool,
    ) -> ValidationReport {
        let report = ValidationReport {
            native: fields.check_validity(),
            signature_present: pad.has_signature(),
            consent_given: fields.consent_given(),
        };

        let indicators = &mut self.indicators;
        indicators.busy = busy;
        indicators.submit_enabled = report.all_valid() && !busy;
        // Only nag about the signature once the user has tried to draw
        indicators.signature_warning = !report.signature_present && pad.has_drawn();
        if !report.signature_present && !pad.has_drawn() {
            indicators.signature_invalid = false;
        }
        indicators.consent_warning = !report.consent_given;

        trace!("Validation: {:?} -> {:?}", report, indicators);
        report
    }

    /// A segment reached the canvas
    pub fn mark_signature_drawn(&mut self) {
        self.indicators.has_signature_style = true;
    }

    /// The canvas was erased
    pub fn clear_signature_marks(&mut self) {
        self.indicators.has_signature_style = false;
        self.indicators.signature_invalid = false;
        self.indicators.signature_warning = false;
    }

    /// Submit attempted without a signature
    pub fn flag_missing_signature(&mut self) {
        self.indicators.signature_invalid = true;
        self.indicators.signature_warning = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::filled_fields;
    use readsign_ipc::{CanvasRect, Consent, FieldId, PointerInput};
    use readsign_pad::StrokeStyle;

    fn blank_pad() -> SignaturePad {
        let mut pad = SignaturePad::new(StrokeStyle::new(2.5, [31, 41, 55, 255]));
        pad.resize(200.0, 100.0, 1.0);
        pad
    }

    fn signed_pad() -> SignaturePad {
        let mut pad = blank_pad();
        let rect = CanvasRect::new(0.0, 0.0, 200.0, 100.0);
        pad.pen_down(&PointerInput::mouse(10.0, 10.0), &rect);
        pad.pen_move(&PointerInput::mouse(60.0, 40.0), &rect);
        pad.pen_up();
        pad
    }

    #[test]
    fn test_submit_enabled_is_conjunction() {
        for native in [false, true] {
            for signed in [false, true] {
                for ack_read in [false, true] {
                    for ack_priv in [false, true] {
                        for busy in [false, true] {
                            let mut fields = filled_fields();
                            if !native {
                                fields.set(FieldId::Location, "");
                            }
                            fields.set_consent(Consent::Read, ack_read);
                            fields.set_consent(Consent::Privacy, ack_priv);
                            let pad = if signed { signed_pad() } else { blank_pad() };

                            let mut validator = FormValidator::new();
                            validator.validate(&fields, &pad, busy);

                            let expected = native && signed && ack_read && ack_priv && !busy;
                            assert_eq!(
                                validator.indicators().submit_enabled,
                                expected,
                                "native={native} signed={signed} read={ack_read} priv={ack_priv} busy={busy}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_validate_is_idempotent() {
        let fields = filled_fields();
        let pad = signed_pad();
        let mut validator = FormValidator::new();

        let first = validator.validate(&fields, &pad, false);
        let indicators = validator.indicators();
        let second = validator.validate(&fields, &pad, false);

        assert_eq!(first, second);
        assert_eq!(indicators, validator.indicators());
    }

    #[test]
    fn test_consent_warning_tracks_checkboxes() {
        let mut fields = filled_fields();
        let pad = signed_pad();
        let mut validator = FormValidator::new();

        fields.set_consent(Consent::Privacy, false);
        validator.validate(&fields, &pad, false);
        assert!(validator.indicators().consent_warning);

        fields.set_consent(Consent::Privacy, true);
        validator.validate(&fields, &pad, false);
        assert!(!validator.indicators().consent_warning);
    }

    #[test]
    fn test_untouched_pad_clears_invalid_mark() {
        let fields = filled_fields();
        let pad = blank_pad();
        let mut validator = FormValidator::new();

        validator.flag_missing_signature();
        assert!(validator.indicators().signature_invalid);

        let report = validator.validate(&fields, &pad, false);
        assert!(!report.signature_present);
        assert!(!validator.indicators().signature_invalid);
        assert!(!validator.indicators().signature_warning);
    }
}
