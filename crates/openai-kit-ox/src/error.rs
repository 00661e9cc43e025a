use std::string::FromUtf8Error;

use ox_transport::TransportError;
use thiserror::Error;

/// Errors that can occur when calling the OpenAI API
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// The API answered outside the documented success shape
    #[error("Unexpected response from API (status {status_code}): {payload}")]
    UnexpectedResponse { status_code: u16, payload: String },

    /// A completion succeeded but carried no message text
    #[error("Response contained no message content")]
    NoContent,

    /// An image request succeeded but returned no images
    #[error("Response contained no results")]
    EmptyResult,

    /// The raw upload path got a non-200 status
    #[error("Invalid status code: {code}")]
    InvalidStatusCode { code: u16 },

    /// The raw upload path got a body that is not UTF-8 text
    #[error("Response body is not valid UTF-8: {0}")]
    InvalidEncoding(#[source] FromUtf8Error),

    /// Missing API key
    #[error("Missing API key")]
    MissingApiKey,

    /// Transport level failure (network, serialization, headers)
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl OpenAIError {
    pub(crate) fn unexpected(status_code: u16, payload: &[u8]) -> Self {
        Self::UnexpectedResponse {
            status_code,
            payload: String::from_utf8_lossy(payload).into_owned(),
        }
    }

    /// HTTP status attached to this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedResponse { status_code, .. } => Some(*status_code),
            Self::InvalidStatusCode { code } => Some(*code),
            Self::Transport(TransportError::Decode { status_code, .. }) => Some(*status_code),
            Self::Transport(TransportError::Http(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
