//! Error types for IPC operations.

/// Errors that can occur while encoding or decoding widget data.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Unknown form field: {0}")]
    UnknownField(String),
}
