use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use gbridge::BridgeHooks;
use gprovider::{Capability, DeploymentHandle, InferenceHooks, PredictionError};
use gtransport::{TransportError, TransportHooks};

/// Swallows panics from the wrapped hooks so a faulty observer cannot abort a request.
pub struct SafeTransportHooks<H> {
    inner: H,
}

impl<H> SafeTransportHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> TransportHooks for SafeTransportHooks<H>
where
    H: TransportHooks,
{
    fn on_attempt_start(&self, operation: &str, attempt: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_attempt_start(operation, attempt)
        }));
    }

    fn on_attempt_failure(
        &self,
        operation: &str,
        attempt: u32,
        next_delay: Option<Duration>,
        error: &TransportError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_attempt_failure(operation, attempt, next_delay, error)
        }));
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(operation, attempts)
        }));
    }

    fn on_exhausted(&self, operation: &str, attempts: u32, error: &TransportError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_exhausted(operation, attempts, error)
        }));
    }
}

pub struct SafeInferenceHooks<H> {
    inner: H,
}

impl<H> SafeInferenceHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> InferenceHooks for SafeInferenceHooks<H>
where
    H: InferenceHooks,
{
    fn on_deployment_resolved(&self, capability: Capability, handle: &DeploymentHandle) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_deployment_resolved(capability, handle)
        }));
    }

    fn on_prediction_failure(
        &self,
        capability: Capability,
        deployment_id: &str,
        error: &PredictionError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_prediction_failure(capability, deployment_id, error)
        }));
    }

    fn on_rerank_skip(&self, deployment_id: &str, document_index: usize, reason: &PredictionError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_rerank_skip(deployment_id, document_index, reason)
        }));
    }
}

pub struct SafeBridgeHooks<H> {
    inner: H,
}

impl<H> SafeBridgeHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> BridgeHooks for SafeBridgeHooks<H>
where
    H: BridgeHooks,
{
    fn on_rerank_fallback(&self, document_count: usize, error: &PredictionError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_rerank_fallback(document_count, error)
        }));
    }
}
