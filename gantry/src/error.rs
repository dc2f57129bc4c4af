//! Facade-level error covering configuration and wiring failures.

use std::error::Error;
use std::fmt::{Display, Formatter};

use gcommon::ConfigurationError;
use gmemory::MemoryError;
use gprovider::PredictionError;
use gtransport::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    Configuration,
    Prediction,
    Transport,
    Storage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Configuration, message)
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for GatewayError {}

impl From<ConfigurationError> for GatewayError {
    fn from(value: ConfigurationError) -> Self {
        Self::configuration(value.to_string())
    }
}

impl From<PredictionError> for GatewayError {
    fn from(value: PredictionError) -> Self {
        let kind = match value.kind {
            gprovider::PredictionErrorKind::Configuration => GatewayErrorKind::Configuration,
            _ => GatewayErrorKind::Prediction,
        };
        Self::new(kind, value.to_string())
    }
}

impl From<TransportError> for GatewayError {
    fn from(value: TransportError) -> Self {
        Self::new(GatewayErrorKind::Transport, value.to_string())
    }
}

impl From<MemoryError> for GatewayError {
    fn from(value: MemoryError) -> Self {
        let kind = match value.kind {
            gmemory::MemoryErrorKind::Configuration => GatewayErrorKind::Configuration,
            _ => GatewayErrorKind::Storage,
        };
        Self::new(kind, value.to_string())
    }
}
