use thiserror::Error;

/// Failures talking to either remote API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("HTTP error! status: {status}")]
    Http { status: u16, body: String },

    /// Connection, TLS or body-read failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON we expected
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status for `Http` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
