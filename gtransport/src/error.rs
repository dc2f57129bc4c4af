//! Transport error kinds and error value helpers.
//!
//! ```rust
//! use gtransport::{TransportError, TransportErrorKind};
//!
//! let last = TransportError::status(503, "service unavailable");
//! let exhausted = TransportError::exhausted(3, last);
//! assert_eq!(exhausted.kind, TransportErrorKind::Status);
//! assert_eq!(exhausted.attempts, 3);
//! assert!(exhausted.message.starts_with("all 3 attempts failed"));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Network,
    Status,
    Decode,
    InvalidRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub attempts: u32,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            attempts: 1,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Network, message)
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(TransportErrorKind::Status, message)
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Decode, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::InvalidRequest, message)
    }

    /// Aggregates the final failure of a retry sequence.
    pub fn exhausted(attempts: u32, last: TransportError) -> Self {
        Self {
            kind: last.kind,
            message: format!("all {attempts} attempts failed: {last}"),
            status: last.status,
            attempts,
        }
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::timeout(error.to_string())
        } else if error.is_decode() {
            Self::decode(error.to_string())
        } else if let Some(status) = error.status() {
            Self::status(status.as_u16(), error.to_string())
        } else {
            Self::network(error.to_string())
        }
    }
}
