//! Inference error kinds and error value helpers.
//!
//! ```rust
//! use gprovider::{PredictionError, PredictionErrorKind};
//!
//! let empty = PredictionError::empty_result("no prediction returned");
//! assert_eq!(empty.kind, PredictionErrorKind::EmptyResult);
//! assert!(empty.is_missing_result());
//!
//! let resolution = PredictionError::resolution("deployment not found");
//! assert!(!resolution.is_missing_result());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use gcommon::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionErrorKind {
    Configuration,
    Resolution,
    Transport,
    EmptyResult,
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionError {
    pub kind: PredictionErrorKind,
    pub message: String,
}

impl PredictionError {
    pub fn new(kind: PredictionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(PredictionErrorKind::Configuration, message)
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        Self::new(PredictionErrorKind::Resolution, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(PredictionErrorKind::Transport, message)
    }

    pub fn empty_result(message: impl Into<String>) -> Self {
        Self::new(PredictionErrorKind::EmptyResult, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(PredictionErrorKind::Decode, message)
    }

    /// The backend answered but produced nothing usable.
    pub fn is_missing_result(&self) -> bool {
        matches!(
            self.kind,
            PredictionErrorKind::EmptyResult | PredictionErrorKind::Decode
        )
    }
}

impl Display for PredictionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for PredictionError {}

impl From<ConfigurationError> for PredictionError {
    fn from(value: ConfigurationError) -> Self {
        PredictionError::configuration(value.to_string())
    }
}

#[cfg(feature = "http-backend")]
impl From<gtransport::TransportError> for PredictionError {
    fn from(value: gtransport::TransportError) -> Self {
        PredictionError::transport(value.to_string())
    }
}
