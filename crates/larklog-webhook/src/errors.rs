use thiserror::Error;

/// Why a webhook delivery failed.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to marshal payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to create request: {0}")]
    Request(String),
    #[error("failed to send request: {0}")]
    Transport(String),
    #[error("failed to read response body: {0}")]
    Read(String),
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    InvalidResponse(String),
    /// The webhook answered 2xx but reported a non-zero `code`.
    #[error("lark API error (code: {code}): {msg}")]
    Rejected { code: i64, msg: String },
    #[error("failed to send message after {retries} retries ({attempts} attempts): {source}")]
    RetriesExhausted {
        retries: u32,
        attempts: u32,
        #[source]
        source: Box<DeliveryError>,
    },
}

impl DeliveryError {
    /// Number of attempts made before giving up (1 for errors raised before
    /// the retry loop).
    pub fn attempts(&self) -> u32 {
        match self {
            DeliveryError::RetriesExhausted { attempts, .. } => *attempts,
            _ => 1,
        }
    }

    /// The underlying failure, unwrapping the retry summary.
    pub fn last_cause(&self) -> &DeliveryError {
        match self {
            DeliveryError::RetriesExhausted { source, .. } => source.last_cause(),
            other => other,
        }
    }
}
