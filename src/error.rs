//! TaskTagger Error Types
//!
//! Centralized error handling for the classification pipeline and exporters.

use thiserror::Error;

/// Central error type for TaskTagger
#[derive(Error, Debug)]
pub enum TaggerError {
    /// No credential is configured for the remote classifier
    #[error("Remote classifier unavailable: no API key configured")]
    RemoteUnavailable,

    /// Transport or service-level failure, including timeouts
    #[error("Remote request failed: {0}")]
    RemoteRequest(String),

    /// The remote reply was not a parseable array of task records
    #[error("Malformed remote response: {0}")]
    MalformedResponse(String),

    #[error("No valid tasks provided")]
    NoValidTasks,

    #[error("No tasks to export")]
    NothingToExport,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TaggerError {
    /// Expected failure of the remote path (logged as a warning).
    ///
    /// Other errors from the remote path still fall back but are logged as errors.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            TaggerError::RemoteUnavailable
                | TaggerError::RemoteRequest(_)
                | TaggerError::MalformedResponse(_)
        )
    }
}

/// Result type alias for TaskTagger operations
pub type TaggerResult<T> = Result<T, TaggerError>;

/// Transport errors (connect, timeout, non-JSON envelopes) are remote request failures
impl From<reqwest::Error> for TaggerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TaggerError::RemoteRequest(format!("timed out: {err}"))
        } else {
            TaggerError::RemoteRequest(err.to_string())
        }
    }
}
