//! Error types shared by services and view models.

use thiserror::Error;

/// Shown for any transport-level failure.
pub const CONNECTION_ERROR_MESSAGE: &str = "Unable to connect to server. Please try again.";

/// Errors from a backend round trip.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    /// Response body could not be read as the expected JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Token could not be persisted after a successful call.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 401, .. })
    }

    /// Message for the UI; `fallback` is used when the backend gave none.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Network(_) => CONNECTION_ERROR_MESSAGE.to_string(),
            ApiError::Rejected { message: Some(message), .. } if !message.is_empty() => {
                message.clone()
            }
            ApiError::Storage(e) => e.to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Serialization(e.to_string())
    }
}

/// Why a bearer token could not be decoded into claims.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("expected 3 token segments, found {0}")]
    Segments(usize),

    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not valid claims JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,

    #[error("could not write to storage: {0}")]
    Write(String),
}
