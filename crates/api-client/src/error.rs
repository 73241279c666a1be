//! Error types for the API client

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Login failed: bad credentials, or the vendor sent no session token
    #[error("{0}")]
    Auth(String),

    /// API returned a non-2xx response
    #[error("API error ({status}): {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Vendor error code, when the error envelope carried one
        code: Option<String>,
        /// Error message from the envelope, or the status text
        message: String,
    },

    /// An undocumented response did not have the shape the extractors expect
    #[error("Unexpected response shape: {0}")]
    Parse(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create an HTTP error from a status and message
    pub fn http(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            code,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Status code of an HTTP error, if this is one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Http { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Http { status, .. } if *status >= 500)
    }

    /// Check if the vendor rejected the session token
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401 | 403, .. })
    }
}

/// Error envelope returned by the vendor on failure status codes
///
/// ```json
/// { "error": { "code": "AUTH_INVALID_CRED", "message": "Invalid credentials" } }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    /// The error body
    pub error: ErrorBody,
}

/// Inner part of [`ErrorEnvelope`]
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Vendor error code
    pub code: Option<String>,
    /// Human readable message; empty when the vendor sent none
    #[serde(default)]
    pub message: String,
    /// Free-form details, present on some validation errors
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// Try to decode an envelope from a raw response body
    #[must_use]
    pub fn from_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// The vendor message, or the status text when the message is empty
    pub(crate) fn message_or_status_text(&self, status: reqwest::StatusCode) -> String {
        if self.error.message.trim().is_empty() {
            status_text(status)
        } else {
            self.error.message.clone()
        }
    }
}

/// Status text used when a failure response carries no envelope
pub(crate) fn status_text(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| "Unknown error".to_string(), str::to_string)
}
