//! Error types for the CarTrack core.

use thiserror::Error;

/// Errors raised while decoding or encoding contract payloads.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed {what} payload: {reason}")]
    MalformedPayload { what: &'static str, reason: String },

    #[error("encoding error: {0}")]
    EncodingError(String),
}

impl CoreError {
    pub(crate) fn malformed(what: &'static str, err: serde_json::Error) -> Self {
        CoreError::MalformedPayload {
            what,
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::EncodingError(e.to_string())
    }
}

/// Semantic errors for payloads that parsed but cannot be accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no chassis number provided")]
    BlankChassisNumber,

    #[error("empty data provided")]
    EmptyBatch,

    #[error("chassis number {0} is already registered")]
    DuplicateChassisNumber(String),
}
