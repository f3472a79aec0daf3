//! Error types for the admin API client

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the admin API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure: connect, timeout, TLS, body read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("API returned {status}{}", message_suffix(.message))]
    Status {
        /// Response status
        status: StatusCode,
        /// Message extracted from the response body, if any
        message: Option<String>,
    },

    /// The response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The local token store could not be read or written
    #[error("Token storage error: {message}")]
    Storage {
        /// Error message
        message: String,
    },

    /// The base URL is not an absolute http(s) URL
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Status code of the failed response, when the server answered at all
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Human-readable message for notifications
    ///
    /// Prefers the message the server put in its error body and falls back
    /// to this error's display text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.trim().to_string(),
            other => other.to_string(),
        }
    }

    /// Build a status error from a response body
    ///
    /// JSON bodies contribute their `message`, `error` or `detail` string;
    /// short plain-text bodies are used as-is.
    pub(crate) fn from_body(status: StatusCode, body: &str) -> Self {
        Self::Status {
            status,
            message: extract_message(body),
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => ["message", "error", "detail"]
            .iter()
            .find_map(|key| map.get(*key).and_then(serde_json::Value::as_str))
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string),
        Ok(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Ok(_) => None,
        Err(_) if body.len() <= 200 && !body.starts_with('<') => Some(body.to_string()),
        Err(_) => None,
    }
}
