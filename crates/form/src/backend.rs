//! Remote submission capability

use readsign_ipc::{FormSnapshot, SubmitReceipt};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The backend refused the submission; the text is shown to the user
    #[error("{0}")]
    Rejected(String),

    #[error("Network request failed: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

/// Sends a snapshot somewhere and reports the outcome.
///
/// Implementations are single-threaded (browser futures are not `Send`).
#[allow(async_fn_in_trait)]
pub trait SubmitBackend {
    async fn submit(&self, snapshot: FormSnapshot) -> Result<SubmitReceipt, SubmitError>;
}
