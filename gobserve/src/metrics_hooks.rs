//! Metrics-based observability hooks for transport, inference, and bridge events.
//!
//! ```rust
//! use gobserve::MetricsObservabilityHooks;
//! use gprovider::InferenceHooks;
//!
//! fn accepts_inference_hooks(_hooks: &dyn InferenceHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_inference_hooks(&hooks);
//! ```

use std::time::Duration;

use gbridge::BridgeHooks;
use gprovider::{Capability, DeploymentHandle, InferenceHooks, PredictionError};
use gtransport::{TransportError, TransportHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl TransportHooks for MetricsObservabilityHooks {
    fn on_attempt_start(&self, operation: &str, _attempt: u32) {
        metrics::counter!(
            "gantry_transport_attempt_start_total",
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_attempt_failure(
        &self,
        operation: &str,
        _attempt: u32,
        next_delay: Option<Duration>,
        error: &TransportError,
    ) {
        metrics::counter!(
            "gantry_transport_attempt_failure_total",
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        if let Some(delay) = next_delay {
            metrics::histogram!(
                "gantry_transport_retry_delay_seconds",
                "operation" => operation.to_string()
            )
            .record(delay.as_secs_f64());
        }
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        metrics::counter!(
            "gantry_transport_success_total",
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "gantry_transport_attempts_per_success",
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }

    fn on_exhausted(&self, operation: &str, attempts: u32, error: &TransportError) {
        metrics::counter!(
            "gantry_transport_exhausted_total",
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "gantry_transport_attempts_per_failure",
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }
}

impl InferenceHooks for MetricsObservabilityHooks {
    fn on_deployment_resolved(&self, capability: Capability, _handle: &DeploymentHandle) {
        metrics::counter!(
            "gantry_inference_deployment_resolved_total",
            "capability" => capability.to_string()
        )
        .increment(1);
    }

    fn on_prediction_failure(
        &self,
        capability: Capability,
        _deployment_id: &str,
        error: &PredictionError,
    ) {
        metrics::counter!(
            "gantry_inference_prediction_failure_total",
            "capability" => capability.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }

    fn on_rerank_skip(
        &self,
        _deployment_id: &str,
        _document_index: usize,
        reason: &PredictionError,
    ) {
        metrics::counter!(
            "gantry_inference_rerank_skip_total",
            "error_kind" => format!("{:?}", reason.kind)
        )
        .increment(1);
    }
}

impl BridgeHooks for MetricsObservabilityHooks {
    fn on_rerank_fallback(&self, document_count: usize, error: &PredictionError) {
        metrics::counter!(
            "gantry_bridge_rerank_fallback_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!("gantry_bridge_rerank_fallback_documents")
            .record(document_count as f64);
    }
}
