//! Shared error type across xviz-stream crates.

use thiserror::Error;

/// Stable error codes (surfaced to callbacks, logs, and test vectors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed JSON text/bytes or an undecodable message shape.
    Decode,
    /// Binary container recognized but truncated or corrupt.
    Binary,
    /// Unsupported protocol or config version.
    UnsupportedVersion,
    /// Media payload with no handler able to process it.
    UnsupportedMedia,
    /// Invalid configuration.
    BadConfig,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Decode => "DECODE_ERROR",
            ErrorCode::Binary => "BINARY_ERROR",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::UnsupportedMedia => "UNSUPPORTED_MEDIA",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, XvizError>;

/// Unified error type used by core and parser.
#[derive(Debug, Error)]
pub enum XvizError {
    #[error("decode error: {0}")]
    Decode(String),
    #[error("binary decode error: {0}")]
    Binary(String),
    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),
    #[error("unsupported media payload ({len} bytes)")]
    UnsupportedMedia { len: usize },
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl XvizError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            XvizError::Decode(_) => ErrorCode::Decode,
            XvizError::Binary(_) => ErrorCode::Binary,
            XvizError::UnsupportedVersion(_) => ErrorCode::UnsupportedVersion,
            XvizError::UnsupportedMedia { .. } => ErrorCode::UnsupportedMedia,
            XvizError::BadConfig(_) => ErrorCode::BadConfig,
            XvizError::Internal(_) => ErrorCode::Internal,
        }
    }
}

impl From<serde_json::Error> for XvizError {
    fn from(e: serde_json::Error) -> Self {
        XvizError::Decode(format!("invalid json: {e}"))
    }
}
