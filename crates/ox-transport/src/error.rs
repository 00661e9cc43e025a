use thiserror::Error;

/// Errors raised by the transport itself, before any response classification
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization of the request body failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A header name or value could not be represented
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A success response whose body did not match the documented shape
    #[error("HTTP {status_code} but failed to decode body: {message}; body: {body}")]
    Decode {
        status_code: u16,
        message: String,
        body: String,
    },
}

impl TransportError {
    /// Build a decode error from a success status and the raw body
    pub(crate) fn decode(
        status: reqwest::StatusCode,
        err: &serde_json::Error,
        body: &[u8],
    ) -> Self {
        Self::Decode {
            status_code: status.as_u16(),
            message: err.to_string(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }
}
