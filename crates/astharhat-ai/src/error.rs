//! AI client error types.

use std::time::Duration;

/// Errors from a generative-model call.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("HTTP error: {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request error: {0}")]
    Request(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("API key cannot be empty")]
    MissingApiKey,

    #[error("No API key configured; running offline")]
    Offline,
}

impl AiError {
    /// Whether a retry might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AiError::Http { status, .. } => *status == 429 || (500..600).contains(status),
            AiError::Timeout(_) | AiError::Connection(_) => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            AiError::Connection(e.to_string())
        } else if e.is_decode() {
            AiError::Deserialization(e.to_string())
        } else if let Some(status) = e.status() {
            AiError::Http {
                status: status.as_u16(),
                body: e.to_string(),
            }
        } else {
            AiError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AiError {
    fn from(e: serde_json::Error) -> Self {
        AiError::Deserialization(e.to_string())
    }
}
