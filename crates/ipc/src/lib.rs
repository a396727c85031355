//! Data types for Read & Sign
//!
//! Everything that crosses the boundary between the host page and the
//! widget core: raw pointer input, widget events, the submitted form
//! snapshot and the backend receipt.

mod error;
mod input;
mod messages;
mod snapshot;

pub use error::IpcError;
pub use input::{CanvasRect, PointerInput, TouchPoint};
pub use messages::{Consent, FieldId, WidgetEvent};
pub use snapshot::{FormSnapshot, SubmitReceipt};
