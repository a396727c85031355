//! Form field values and native constraints

use readsign_ipc::{Consent, FieldId, FormSnapshot};
use thiserror::Error;

/// First failing native constraint, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    #[error("Required field {0} is empty")]
    ValueMissing(FieldId),

    #[error("Required consent {0:?} is not checked")]
    ConsentMissing(Consent),

    #[error("A form control fails its markup constraints")]
    Unsatisfied,
}

/// Current values of the form controls.
///
/// Every text/select field and both checkboxes are declared required, the
/// way the markup declares them. Required only means non-empty here;
/// whitespace is a value until the business rules trim it. Once the host
/// reports the page's own validity, that verdict wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    first_name: String,
    last_name: String,
    staff_id: String,
    position: String,
    division: String,
    department: String,
    section: String,
    location: String,
    ack_read: bool,
    ack_priv: bool,
    /// Last `checkValidity()` result from the page, if the host reports one
    page_valid: Option<bool>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::FirstName => &self.first_name,
            FieldId::LastName => &self.last_name,
            FieldId::StaffId => &self.staff_id,
            FieldId::Position => &self.position,
            FieldId::Division => &self.division,
            FieldId::Department => &self.department,
            FieldId::Section => &self.section,
            FieldId::Location => &self.location,
        }
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let slot = match field {
            FieldId::FirstName => &mut self.first_name,
            FieldId::LastName => &mut self.last_name,
            FieldId::StaffId => &mut self.staff_id,
            FieldId::Position => &mut self.position,
            FieldId::Division => &mut self.division,
            FieldId::Department => &mut self.department,
            FieldId::Section => &mut self.section,
            FieldId::Location => &mut self.location,
        };
        *slot = value.into();
    }

    pub fn consent(&self, consent: Consent) -> bool {
        match consent {
            Consent::Read => self.ack_read,
            Consent::Privacy => self.ack_priv,
        }
    }

    pub fn set_consent(&mut self, consent: Consent, checked: bool) {
        match consent {
            Consent::Read => self.ack_read = checked,
            Consent::Privacy => self.ack_priv = checked,
        }
    }

    /// Both acknowledgements checked
    pub fn consent_given(&self) -> bool {
        self.ack_read && self.ack_priv
    }

    pub fn set_page_validity(&mut self, valid: bool) {
        self.page_valid = Some(valid);
    }

    /// Native constraint validation.
    ///
    /// The page's verdict decides when known; the required checks then only
    /// name the first failing control in document order.
    pub fn check_validity(&self) -> Result<(), ConstraintViolation> {
        match (self.page_valid, self.first_missing()) {
            (Some(true), _) => Ok(()),
            (Some(false), None) => Err(ConstraintViolation::Unsatisfied),
            (_, Some(violation)) => Err(violation),
            (None, None) => Ok(()),
        }
    }

    fn first_missing(&self) -> Option<ConstraintViolation> {
        if let Some(field) = FieldId::ALL.into_iter().find(|&f| self.get(f).is_empty()) {
            return Some(ConstraintViolation::ValueMissing(field));
        }
        [Consent::Read, Consent::Privacy]
            .into_iter()
            .find(|&c| !self.consent(c))
            .map(ConstraintViolation::ConsentMissing)
    }

    /// Forget every value until the host reads the controls again
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build the submission payload. Free-text fields are trimmed, selector
    /// values are taken verbatim.
    pub fn snapshot(&self, signature_data: String) -> FormSnapshot {
        let value = |field: FieldId| {
            let raw = self.get(field);
            if field.is_free_text() {
                raw.trim().to_string()
            } else {
                raw.to_string()
            }
        };

        FormSnapshot {
            first_name: value(FieldId::FirstName),
            last_name: value(FieldId::LastName),
            staff_id: value(FieldId::StaffId),
            position: value(FieldId::Position),
            division: value(FieldId::Division),
            department: value(FieldId::Department),
            section: value(FieldId::Section),
            location: value(FieldId::Location),
            signature_data,
            ack_read: self.ack_read,
            ack_priv: self.ack_priv,
        }
    }
}

#[cfg(test)]
pub(crate) fn filled_fields() -> FormFields {
    let mut fields = FormFields::new();
    fields.set(FieldId::FirstName, "Somchai");
    fields.set(FieldId::LastName, "Jaidee");
    fields.set(FieldId::StaffId, "12345");
    fields.set(FieldId::Position, "Technician");
    fields.set(FieldId::Division, "Operations");
    fields.set(FieldId::Department, "Maintenance");
    fields.set(FieldId::Section, "Line");
    fields.set(FieldId::Location, "UTP");
    fields.set_consent(Consent::Read, true);
    fields.set_consent(Consent::Privacy, true);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_reports_first_field() {
        let fields = FormFields::new();
        assert_eq!(
            fields.check_validity(),
            Err(ConstraintViolation::ValueMissing(FieldId::FirstName))
        );
    }

    #[test]
    fn test_document_order() {
        let mut fields = filled_fields();
        fields.set(FieldId::Section, "");
        fields.set(FieldId::Position, "");
        fields.set_consent(Consent::Read, false);
        assert_eq!(
            fields.check_validity(),
            Err(ConstraintViolation::ValueMissing(FieldId::Position))
        );

        let mut fields = filled_fields();
        fields.set_consent(Consent::Privacy, false);
        assert_eq!(
            fields.check_validity(),
            Err(ConstraintViolation::ConsentMissing(Consent::Privacy))
        );
    }

    #[test]
    fn test_whitespace_satisfies_required() {
        let mut fields = filled_fields();
        fields.set(FieldId::FirstName, "   ");
        assert!(fields.check_validity().is_ok());
    }

    #[test]
    fn test_snapshot_trims_free_text_only() {
        let mut fields = filled_fields();
        fields.set(FieldId::FirstName, "  Somchai ");
        fields.set(FieldId::StaffId, " 12345\n");
        fields.set(FieldId::Division, " Operations ");

        let snapshot = fields.snapshot("data:image/png;base64,AA".to_string());
        assert_eq!(snapshot.first_name, "Somchai");
        assert_eq!(snapshot.staff_id, "12345");
        assert_eq!(snapshot.division, " Operations ");
        assert!(snapshot.ack_read && snapshot.ack_priv);
    }

    #[test]
    fn test_page_verdict_wins() {
        let mut fields = filled_fields();
        fields.set_page_validity(false);
        assert_eq!(
            fields.check_validity(),
            Err(ConstraintViolation::Unsatisfied)
        );

        fields.set(FieldId::Section, "");
        assert_eq!(
            fields.check_validity(),
            Err(ConstraintViolation::ValueMissing(FieldId::Section))
        );

        fields.set_page_validity(true);
        assert!(fields.check_validity().is_ok());
    }

    #[test]
    fn test_reset() {
        let mut fields = filled_fields();
        fields.reset();
        assert_eq!(fields, FormFields::default());
        assert!(!fields.consent_given());
    }
}
