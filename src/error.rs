//! Crate error type
//!
//! Every fallible operation in the list engine, the transport and the
//! services returns [`SyncError`]. List loads swallow it after logging;
//! mutating actions hand it back to the caller, who turns it into a toast
//! with [`crate::classify::user_message`].

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum SyncError {
    /// Request never produced an HTTP response (DNS, connect, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-success status. `payload` is the decoded
    /// error body, `Value::Null` when the body was not JSON.
    #[error("HTTP {status}: {}", summary(.payload))]
    Status { status: u16, payload: Value },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn summary(payload: &Value) -> String {
    crate::classify::extract_error_type(payload)
        .or_else(|| crate::classify::extract_error_message(payload))
        .unwrap_or("no error details")
        .to_string()
}

impl SyncError {
    /// Stable code for logs and metrics
    pub fn code(&self) -> &'static str {
        match self {
            SyncError::Transport(_) => "TRANSPORT_ERROR",
            SyncError::Status { .. } => "HTTP_STATUS",
            SyncError::Decode(_) => "DECODE_ERROR",
            SyncError::Config(_) => "CONFIG_ERROR",
            SyncError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Render into the nested shape the classifier reads.
    ///
    /// Status errors place the body under `response.data`, matching what
    /// HTTP client wrappers deliver. Everything else has no backend body.
    pub fn as_error_value(&self) -> Value {
        match self {
            SyncError::Status { status, payload } => json!({
                "response": { "status": status, "data": payload }
            }),
            other => json!({ "message": other.to_string() }),
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SyncError::Decode(e.to_string())
        } else {
            SyncError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::Decode(e.to_string())
    }
}
