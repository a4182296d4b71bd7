//! Core error types.

use thiserror::Error;

/// Errors produced by the blog client and the stream decoder.
///
/// Cancellation is deliberately absent: a cancelled stream resolves to
/// [`crate::streaming::StreamOutcome::Cancelled`] and never reaches `on_error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlogError {
    /// Non-2xx response or network failure.
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// A record inside an otherwise healthy stream carried an `error` field.
    #[error("Stream error: {0}")]
    Stream(String),

    /// A payload could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The envelope reported `code != 0`.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// The server rejected the credentials (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The client was configured with unusable values.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, BlogError>;

impl BlogError {
    /// Transport error for a non-success HTTP status.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Transport error without a status (connection reset, DNS, ...).
    pub fn network(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// The bare message, without the variant prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message, .. } | Self::Api { message, .. } => message,
            Self::Stream(m) | Self::Parse(m) | Self::Unauthorized(m) | Self::Configuration(m) => m,
        }
    }

    /// HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    /// Whether the failure came from the HTTP exchange rather than the payload.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Unauthorized(_))
    }
}

impl From<reqwest::Error> for BlogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Parse(err.to_string());
        }
        Self::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BlogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
