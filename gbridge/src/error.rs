//! Bridge-layer errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

use gprovider::{PredictionError, PredictionErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeErrorKind {
    Prediction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeError {
    pub kind: BridgeErrorKind,
    pub message: String,
    /// Kind of the underlying prediction failure, when there is one.
    pub prediction_kind: Option<PredictionErrorKind>,
}

impl BridgeError {
    pub fn prediction(error: &PredictionError) -> Self {
        Self {
            kind: BridgeErrorKind::Prediction,
            message: error.to_string(),
            prediction_kind: Some(error.kind),
        }
    }
}

impl Display for BridgeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for BridgeError {}

impl From<PredictionError> for BridgeError {
    fn from(value: PredictionError) -> Self {
        BridgeError::prediction(&value)
    }
}
