//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response whose body carried a backend `message`.
    #[error("HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Non-2xx response without a usable message.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// Response body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// The message the backend sent with an error response, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            FetchError::ApiError { message, .. } => Some(message),
            _ => None,
        }
    }

    /// HTTP status of an error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::ApiError { status, .. } | FetchError::HttpError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}
