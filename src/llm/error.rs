//! Error types for the relay layer

use thiserror::Error;

/// Errors that can occur when talking to the upstream completion API
#[derive(Debug, Error)]
pub enum LlmError {
    /// Model name outside the fixed registry
    #[error("Invalid model: {model}, Available models: {valid:?}")]
    InvalidModel {
        model: String,
        valid: Vec<&'static str>,
    },

    /// HTTP request failures
    #[error("HTTP error (status {status}): {body}")]
    Http { status: u16, body: String },

    /// SSE stream parsing failures
    #[error("Stream error: {0}")]
    Stream(String),

    /// JSON encoding/decoding issues
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Structurally valid response missing the expected content
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

// Implement conversion from common error types
impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            LlmError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            LlmError::Http {
                status: 0,
                body: err.to_string(),
            }
        }
    }
}
