//! Tracing-based observability hooks for transport, inference, and bridge events.
//!
//! ```rust
//! use gobserve::TracingObservabilityHooks;
//! use gtransport::TransportHooks;
//!
//! fn accepts_transport_hooks(_hooks: &dyn TransportHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_transport_hooks(&hooks);
//! ```

use std::time::Duration;

use gbridge::BridgeHooks;
use gprovider::{Capability, DeploymentHandle, InferenceHooks, PredictionError};
use gtransport::{TransportError, TransportHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl TransportHooks for TracingObservabilityHooks {
    fn on_attempt_start(&self, operation: &str, attempt: u32) {
        tracing::debug!(
            phase = "transport",
            event = "attempt_start",
            operation,
            attempt
        );
    }

    fn on_attempt_failure(
        &self,
        operation: &str,
        attempt: u32,
        next_delay: Option<Duration>,
        error: &TransportError,
    ) {
        tracing::warn!(
            phase = "transport",
            event = "attempt_failure",
            operation,
            attempt,
            retry_in_ms = next_delay.map(|delay| delay.as_millis() as u64),
            error_kind = ?error.kind,
            status = error.status,
            error = %error
        );
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        tracing::info!(
            phase = "transport",
            event = "success",
            operation,
            attempts
        );
    }

    fn on_exhausted(&self, operation: &str, attempts: u32, error: &TransportError) {
        tracing::error!(
            phase = "transport",
            event = "exhausted",
            operation,
            attempts,
            error_kind = ?error.kind,
            error = %error
        );
    }
}

impl InferenceHooks for TracingObservabilityHooks {
    fn on_deployment_resolved(&self, capability: Capability, handle: &DeploymentHandle) {
        tracing::info!(
            phase = "inference",
            event = "deployment_resolved",
            capability = %capability,
            deployment_id = handle.deployment_id.as_str(),
            label = handle.label.as_deref()
        );
    }

    fn on_prediction_failure(
        &self,
        capability: Capability,
        deployment_id: &str,
        error: &PredictionError,
    ) {
        tracing::error!(
            phase = "inference",
            event = "prediction_failure",
            capability = %capability,
            deployment_id,
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_rerank_skip(&self, deployment_id: &str, document_index: usize, reason: &PredictionError) {
        tracing::warn!(
            phase = "inference",
            event = "rerank_skip",
            deployment_id,
            document_index,
            error_kind = ?reason.kind,
            error = %reason
        );
    }
}

impl BridgeHooks for TracingObservabilityHooks {
    fn on_rerank_fallback(&self, document_count: usize, error: &PredictionError) {
        tracing::warn!(
            phase = "bridge",
            event = "rerank_fallback",
            document_count,
            error_kind = ?error.kind,
            error = %error
        );
    }
}
