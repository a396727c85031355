//! Submitted form payload and backend receipt.

use serde::{Deserialize, Serialize};

use crate::error::IpcError;
use crate::messages::FieldId;

/// Everything submitted for one signing, assembled once per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub first_name: String,
    pub last_name: String,
    pub staff_id: String,
    pub position: String,
    pub division: String,
    pub department: String,
    pub section: String,
    pub location: String,
    /// Rasterized signature as a `data:image/png;base64,...` URI
    pub signature_data: String,
    pub ack_read: bool,
    pub ack_priv: bool,
}

impl FormSnapshot {
    pub fn field(&self, field: FieldId) -> &str {
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

    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Backend acknowledgement of a stored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub ok: bool,
    /// Server-side timestamp, ISO-8601
    #[serde(default)]
    pub timestamp: String,
}

impl SubmitReceipt {
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_keys() {
        let snapshot = FormSnapshot {
            first_name: "Somchai".into(),
            last_name: "Jaidee".into(),
            staff_id: "12345".into(),
            position: "Engineer".into(),
            division: "Ops".into(),
            department: "Maintenance".into(),
            section: "Line".into(),
            location: "UTP".into(),
            signature_data: "data:image/png;base64,AAAA".into(),
            ack_read: true,
            ack_priv: true,
        };

        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        for field in FieldId::ALL {
            assert_eq!(value[field.name()], snapshot.field(field));
        }
        assert_eq!(value["ack_priv"], true);
        assert_eq!(value["signature_data"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_receipt_without_timestamp() {
        let receipt = SubmitReceipt::from_json(r#"{"ok":true}"#).unwrap();
        assert!(receipt.ok);
        assert!(receipt.timestamp.is_empty());
        assert!(SubmitReceipt::from_json("not json").is_err());
    }
}
