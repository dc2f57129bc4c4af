use std::sync::{Arc, Mutex};
use std::time::Duration;

use gbridge::BridgeHooks;
use gprovider::{Capability, DeploymentHandle, InferenceHooks, PredictionError};
use gtransport::{TransportError, TransportHooks};

use crate::{
    MetricsObservabilityHooks, SafeBridgeHooks, SafeInferenceHooks, SafeTransportHooks,
    TracingObservabilityHooks,
};

fn sample_handle() -> DeploymentHandle {
    DeploymentHandle::new("dep-1", "token".into()).with_label("chat deployment")
}

fn fire_all<H>(hooks: &H)
where
    H: TransportHooks + InferenceHooks + BridgeHooks,
{
    let transport_error = TransportError::status(503, "unavailable");
    let prediction_error = PredictionError::empty_result("no prediction");
    let handle = sample_handle();

    TransportHooks::on_attempt_start(hooks, "GET /health", 1);
    hooks.on_attempt_failure(
        "GET /health",
        1,
        Some(Duration::from_millis(10)),
        &transport_error,
    );
    hooks.on_attempt_failure("GET /health", 2, None, &transport_error);
    TransportHooks::on_success(hooks, "GET /health", 2);
    hooks.on_exhausted("GET /health", 2, &transport_error);

    hooks.on_deployment_resolved(Capability::Chat, &handle);
    hooks.on_prediction_failure(Capability::Embed, "dep-2", &prediction_error);
    hooks.on_rerank_skip("dep-3", 4, &prediction_error);

    hooks.on_rerank_fallback(7, &prediction_error);
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    fire_all(&TracingObservabilityHooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    fire_all(&MetricsObservabilityHooks);
}

#[derive(Default, Clone)]
struct RecordingHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingHooks {
    fn push(&self, event: &'static str) {
        self.events.lock().expect("events lock").push(event);
    }
}

impl TransportHooks for RecordingHooks {
    fn on_attempt_start(&self, _operation: &str, _attempt: u32) {
        self.push("attempt_start");
    }

    fn on_attempt_failure(
        &self,
        _operation: &str,
        _attempt: u32,
        _next_delay: Option<Duration>,
        _error: &TransportError,
    ) {
        self.push("attempt_failure");
    }

    fn on_success(&self, _operation: &str, _attempts: u32) {
        self.push("success");
    }

    fn on_exhausted(&self, _operation: &str, _attempts: u32, _error: &TransportError) {
        self.push("exhausted");
    }
}

impl InferenceHooks for RecordingHooks {
    fn on_deployment_resolved(&self, _capability: Capability, _handle: &DeploymentHandle) {
        self.push("resolved");
    }

    fn on_prediction_failure(
        &self,
        _capability: Capability,
        _deployment_id: &str,
        _error: &PredictionError,
    ) {
        self.push("prediction_failure");
    }

    fn on_rerank_skip(
        &self,
        _deployment_id: &str,
        _document_index: usize,
        _reason: &PredictionError,
    ) {
        self.push("rerank_skip");
    }
}

impl BridgeHooks for RecordingHooks {
    fn on_rerank_fallback(&self, _document_count: usize, _error: &PredictionError) {
        self.push("rerank_fallback");
    }
}

struct PanicHooks;

impl TransportHooks for PanicHooks {
    fn on_attempt_start(&self, _operation: &str, _attempt: u32) {
        panic!("attempt_start panic");
    }

    fn on_attempt_failure(
        &self,
        _operation: &str,
        _attempt: u32,
        _next_delay: Option<Duration>,
        _error: &TransportError,
    ) {
        panic!("attempt_failure panic");
    }

    fn on_success(&self, _operation: &str, _attempts: u32) {
        panic!("success panic");
    }

    fn on_exhausted(&self, _operation: &str, _attempts: u32, _error: &TransportError) {
        panic!("exhausted panic");
    }
}

impl InferenceHooks for PanicHooks {
    fn on_deployment_resolved(&self, _capability: Capability, _handle: &DeploymentHandle) {
        panic!("resolved panic");
    }

    fn on_prediction_failure(
        &self,
        _capability: Capability,
        _deployment_id: &str,
        _error: &PredictionError,
    ) {
        panic!("prediction_failure panic");
    }

    fn on_rerank_skip(
        &self,
        _deployment_id: &str,
        _document_index: usize,
        _reason: &PredictionError,
    ) {
        panic!("rerank_skip panic");
    }
}

impl BridgeHooks for PanicHooks {
    fn on_rerank_fallback(&self, _document_count: usize, _error: &PredictionError) {
        panic!("rerank_fallback panic");
    }
}

#[test]
fn safe_transport_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingHooks::default();
    let events = Arc::clone(&inner.events);
    let hooks = SafeTransportHooks::new(inner);
    let error = TransportError::timeout("request timed out");

    hooks.on_attempt_start("POST /chat", 1);
    hooks.on_attempt_failure("POST /chat", 1, Some(Duration::from_millis(5)), &error);
    hooks.on_success("POST /chat", 2);
    hooks.on_exhausted("POST /chat", 2, &error);

    assert_eq!(
        *events.lock().expect("events lock"),
        vec!["attempt_start", "attempt_failure", "success", "exhausted"]
    );
}

#[test]
fn safe_inference_and_bridge_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingHooks::default();
    let events = Arc::clone(&inner.events);
    let inference = SafeInferenceHooks::new(inner.clone());
    let bridge = SafeBridgeHooks::new(inner);
    let error = PredictionError::decode("score was not numeric");

    inference.on_deployment_resolved(Capability::Rerank, &sample_handle());
    inference.on_prediction_failure(Capability::Rerank, "dep-1", &error);
    inference.on_rerank_skip("dep-1", 0, &error);
    bridge.on_rerank_fallback(3, &error);

    assert_eq!(
        *events.lock().expect("events lock"),
        vec!["resolved", "prediction_failure", "rerank_skip", "rerank_fallback"]
    );
}

#[test]
fn safe_hooks_swallow_panics() {
    let transport_error = TransportError::network("connection reset");
    let prediction_error = PredictionError::transport("all 3 attempts failed");

    let transport = SafeTransportHooks::new(PanicHooks);
    transport.on_attempt_start("GET /status", 1);
    transport.on_attempt_failure("GET /status", 1, None, &transport_error);
    transport.on_success("GET /status", 1);
    transport.on_exhausted("GET /status", 1, &transport_error);

    let inference = SafeInferenceHooks::new(PanicHooks);
    inference.on_deployment_resolved(Capability::Embed, &sample_handle());
    inference.on_prediction_failure(Capability::Embed, "dep-1", &prediction_error);
    inference.on_rerank_skip("dep-1", 2, &prediction_error);

    let bridge = SafeBridgeHooks::new(PanicHooks);
    bridge.on_rerank_fallback(1, &prediction_error);
}
