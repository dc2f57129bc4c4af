//! Operational hook contract for inference clients.

use crate::{Capability, DeploymentHandle, PredictionError};

pub trait InferenceHooks: Send + Sync {
    fn on_deployment_resolved(&self, _capability: Capability, _handle: &DeploymentHandle) {}

    fn on_prediction_failure(
        &self,
        _capability: Capability,
        _deployment_id: &str,
        _error: &PredictionError,
    ) {
    }

    /// A rerank call produced no usable score and the document was dropped.
    fn on_rerank_skip(
        &self,
        _deployment_id: &str,
        _document_index: usize,
        _reason: &PredictionError,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInferenceHooks;

impl InferenceHooks for NoopInferenceHooks {}
