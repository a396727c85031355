//! Widget event enum and form field identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IpcError;
use crate::input::{CanvasRect, PointerInput};

/// The eight text/select fields of the form, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    FirstName,
    LastName,
    StaffId,
    Position,
    Division,
    Department,
    Section,
    Location,
}

impl FieldId {
    pub const ALL: [FieldId; 8] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::StaffId,
        FieldId::Position,
        FieldId::Division,
        FieldId::Department,
        FieldId::Section,
        FieldId::Location,
    ];

    /// Form control name (also the snapshot key)
    pub fn name(self) -> &'static str {
        match self {
            FieldId::FirstName => "first_name",
            FieldId::LastName => "last_name",
            FieldId::StaffId => "staff_id",
            FieldId::Position => "position",
            FieldId::Division => "division",
            FieldId::Department => "department",
            FieldId::Section => "section",
            FieldId::Location => "location",
        }
    }

    /// Free-text inputs are trimmed on submit; selectors are taken as-is
    pub fn is_free_text(self) -> bool {
        matches!(
            self,
            FieldId::FirstName | FieldId::LastName | FieldId::StaffId | FieldId::Position
        )
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldId {
    type Err = IpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| IpcError::UnknownField(s.to_string()))
    }
}

/// The two consent checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consent {
    /// "I have read the document"
    Read,
    /// "I accept the privacy notice"
    Privacy,
}

/// Events from the host page to the widget core.
///
/// Submission is not an event here: it is asynchronous and driven through
/// the controller's submit helpers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WidgetEvent {
    /// Mouse button or finger pressed on the canvas
    PenDown { input: PointerInput, rect: CanvasRect },

    /// Pointer moved over the canvas
    PenMove { input: PointerInput, rect: CanvasRect },

    /// Mouse button released or finger lifted
    PenUp,

    /// Pointer left the canvas
    PenLeave,

    /// Touch sequence cancelled by the platform
    PenCancel,

    /// "Clear signature" button
    ClearSignature,

    /// A text or select field changed value
    FieldChanged { field: FieldId, value: String },

    /// A consent checkbox toggled
    ConsentChanged { consent: Consent, checked: bool },

    /// Result of the page's own `form.checkValidity()`, which also covers
    /// markup constraints such as `pattern` and `maxlength`
    ValidityChanged { valid: bool },

    /// OK button of the success dialog
    DialogOk,

    /// Click on the dialog backdrop
    DialogBackdrop,

    /// Document-level key press
    KeyDown { key: String },

    /// Canvas element resized; bursts are debounced by the controller
    Resize {
        rect: CanvasRect,
        device_pixel_ratio: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in FieldId::ALL {
            assert_eq!(field.name().parse::<FieldId>().unwrap(), field);
        }
        assert!("signature".parse::<FieldId>().is_err());
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_string(&WidgetEvent::FieldChanged {
            field: FieldId::StaffId,
            value: "12345".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"type":"FieldChanged","data":{"field":"staff_id","value":"12345"}}"#
        );

        let event: WidgetEvent = serde_json::from_str(r#"{"type":"PenUp"}"#).unwrap();
        assert!(matches!(event, WidgetEvent::PenUp));
    }
}
