//! Business rules applied to the assembled snapshot

use readsign_config::Messages;
use readsign_ipc::FormSnapshot;
use thiserror::Error;

/// Number of digits in a staff identifier
pub const STAFF_ID_DIGITS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("First name is required")]
    FirstNameMissing,
    #[error("Last name is required")]
    LastNameMissing,
    #[error("Staff ID must be exactly {STAFF_ID_DIGITS} digits")]
    StaffIdFormat,
    #[error("Position is required")]
    PositionMissing,
    #[error("Division must be selected")]
    DivisionMissing,
    #[error("Department must be selected")]
    DepartmentMissing,
    #[error("Section must be selected")]
    SectionMissing,
    #[error("Location must be selected")]
    LocationMissing,
}

impl RuleViolation {
    /// Localized text from the message catalog
    pub fn message<'a>(&self, messages: &'a Messages) -> &'a str {
        match self {
            RuleViolation::FirstNameMissing => &messages.first_name_required,
            RuleViolation::LastNameMissing => &messages.last_name_required,
            RuleViolation::StaffIdFormat => &messages.staff_id_format,
            RuleViolation::PositionMissing => &messages.position_required,
            RuleViolation::DivisionMissing => &messages.division_required,
            RuleViolation::DepartmentMissing => &messages.department_required,
            RuleViolation::SectionMissing => &messages.section_required,
            RuleViolation::LocationMissing => &messages.location_required,
        }
    }
}

/// Exactly five ASCII decimal digits
pub fn is_valid_staff_id(staff_id: &str) -> bool {
    staff_id.len() == STAFF_ID_DIGITS && staff_id.bytes().all(|b| b.is_ascii_digit())
}

/// Check the snapshot in a fixed order; the first failure wins
pub fn check_business_rules(snapshot: &FormSnapshot) -> Result<(), RuleViolation> {
    let checks: [(bool, RuleViolation); 8] = [
        (!snapshot.first_name.is_empty(), RuleViolation::FirstNameMissing),
        (!snapshot.last_name.is_empty(), RuleViolation::LastNameMissing),
        (is_valid_staff_id(&snapshot.staff_id), RuleViolation::StaffIdFormat),
        (!snapshot.position.is_empty(), RuleViolation::PositionMissing),
        (!snapshot.division.is_empty(), RuleViolation::DivisionMissing),
        (!snapshot.department.is_empty(), RuleViolation::DepartmentMissing),
        (!snapshot.section.is_empty(), RuleViolation::SectionMissing),
        (!snapshot.location.is_empty(), RuleViolation::LocationMissing),
    ];

    match checks.into_iter().find(|(ok, _)| !ok) {
        Some((_, violation)) => Err(violation),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::filled_fields;
    use readsign_ipc::FieldId;

    fn snapshot() -> FormSnapshot {
        filled_fields().snapshot("data:image/png;base64,AA".to_string())
    }

    #[test]
    fn test_staff_id_rule() {
        assert!(is_valid_staff_id("12345"));
        for bad in ["1234", "123456", "12a45", "", "１２３４５", " 1234"] {
            assert!(!is_valid_staff_id(bad), "{bad:?} should fail");
        }
    }

    #[test]
    fn test_staff_id_violation_message() {
        for bad in ["1234", "123456", "12a45", ""] {
            let mut snapshot = snapshot();
            snapshot.staff_id = bad.to_string();
            let violation = check_business_rules(&snapshot).unwrap_err();
            assert_eq!(violation, RuleViolation::StaffIdFormat);
            assert_eq!(
                violation.message(&Messages::default()),
                "รหัสพนักงานต้องเป็นตัวเลข 5 หลัก"
            );
        }
    }

    #[test]
    fn test_valid_snapshot_passes() {
        assert_eq!(check_business_rules(&snapshot()), Ok(()));
    }

    #[test]
    fn test_first_failure_wins() {
        let mut fields = filled_fields();
        fields.set(FieldId::LastName, "   ");
        fields.set(FieldId::Location, "");
        let snapshot = fields.snapshot(String::new());
        assert_eq!(
            check_business_rules(&snapshot),
            Err(RuleViolation::LastNameMissing)
        );
    }

    #[test]
    fn test_each_rule_has_distinct_message() {
        let messages = Messages::default();
        let all = [
            RuleViolation::FirstNameMissing,
            RuleViolation::LastNameMissing,
            RuleViolation::StaffIdFormat,
            RuleViolation::PositionMissing,
            RuleViolation::DivisionMissing,
            RuleViolation::DepartmentMissing,
            RuleViolation::SectionMissing,
            RuleViolation::LocationMissing,
        ];
        let texts: std::collections::HashSet<&str> =
            all.iter().map(|v| v.message(&messages)).collect();
        assert_eq!(texts.len(), all.len());
    }
}
