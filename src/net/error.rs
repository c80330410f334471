//! Error type for the HTTP side of the adapter.

/// Errors from the auth API transport.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The configured base URL is not usable.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The request never produced a response (connect, DNS, TLS, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("server returned status {status}")]
    Status { status: u16, message: Option<String> },

    /// A success response body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable message supplied by the server, if it sent one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status for server-reported failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
