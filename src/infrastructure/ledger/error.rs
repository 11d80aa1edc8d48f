use thiserror::Error;

/// Failure of a single backend call
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("rejected by backend: {0}")]
    Rejected(String),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),
}
