//! Runtime wiring: one inference gateway, one assistant client, one conversation store.

use std::sync::Arc;

use gbridge::{BridgeHooks, GatewayChatModel, GatewayEmbeddings, GatewayReranker, NoopBridgeHooks};
use gobserve::{
    MetricsObservabilityHooks, SafeBridgeHooks, SafeInferenceHooks, SafeTransportHooks,
    TracingObservabilityHooks,
};
use gprovider::{InferenceGateway, InferenceHooks, NoopInferenceHooks, PredictionBackend};
use gtransport::{NoopTransportHooks, TransportHooks};

use crate::{AssistantClient, ConversationStore, GatewayConfig, GatewayError};

/// Hook sinks handed to every layer the runtime builds.
#[derive(Clone)]
pub struct RuntimeHooks {
    pub transport: Arc<dyn TransportHooks>,
    pub inference: Arc<dyn InferenceHooks>,
    pub bridge: Arc<dyn BridgeHooks>,
}

impl RuntimeHooks {
    pub fn noop() -> Self {
        Self {
            transport: Arc::new(NoopTransportHooks),
            inference: Arc::new(NoopInferenceHooks),
            bridge: Arc::new(NoopBridgeHooks),
        }
    }

    pub fn tracing() -> Self {
        Self {
            transport: Arc::new(SafeTransportHooks::new(TracingObservabilityHooks)),
            inference: Arc::new(SafeInferenceHooks::new(TracingObservabilityHooks)),
            bridge: Arc::new(SafeBridgeHooks::new(TracingObservabilityHooks)),
        }
    }

    pub fn metrics() -> Self {
        Self {
            transport: Arc::new(SafeTransportHooks::new(MetricsObservabilityHooks)),
            inference: Arc::new(SafeInferenceHooks::new(MetricsObservabilityHooks)),
            bridge: Arc::new(SafeBridgeHooks::new(MetricsObservabilityHooks)),
        }
    }
}

impl Default for RuntimeHooks {
    fn default() -> Self {
        Self::tracing()
    }
}

impl std::fmt::Debug for RuntimeHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeHooks").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct GatewayRuntime {
    pub inference: InferenceGateway,
    pub assistant: AssistantClient,
    pub store: ConversationStore,
    pub hooks: RuntimeHooks,
}

impl GatewayRuntime {
    pub fn chat_model(&self) -> Option<GatewayChatModel> {
        self.inference.chat().cloned().map(GatewayChatModel::new)
    }

    pub fn embeddings(&self) -> Option<GatewayEmbeddings> {
        self.inference.embeddings().cloned().map(GatewayEmbeddings::new)
    }

    pub fn reranker(&self) -> Option<GatewayReranker> {
        self.inference
            .rerank()
            .cloned()
            .map(|client| GatewayReranker::new(client).with_hooks(Arc::clone(&self.hooks.bridge)))
    }
}

/// Builds the runtime against the HTTP prediction backend with tracing hooks.
#[cfg(feature = "http-backend")]
pub async fn build_runtime(config: GatewayConfig) -> Result<GatewayRuntime, GatewayError> {
    build_runtime_with_hooks(config, RuntimeHooks::default()).await
}

/// Each configured deployment gets its own HTTP backend so its timeout and
/// retry settings apply only to its own calls.
#[cfg(feature = "http-backend")]
pub async fn build_runtime_with_hooks(
    config: GatewayConfig,
    hooks: RuntimeHooks,
) -> Result<GatewayRuntime, GatewayError> {
    use gprovider::{ChatClient, EmbeddingsClient, HttpPredictionBackend, RerankClient};

    let http_backend = |deployment: &gprovider::DeploymentConfig| {
        HttpPredictionBackend::from_config(deployment).map(|backend| {
            Arc::new(backend.with_transport_hooks(Arc::clone(&hooks.transport)))
                as Arc<dyn PredictionBackend>
        })
    };

    let deployments = config.deployments.clone();
    let mut inference = InferenceGateway::default();
    if let Some(deployment) = deployments.chat {
        let backend = http_backend(&deployment)?;
        inference = inference.with_chat(
            ChatClient::connect_with_hooks(deployment, backend, Arc::clone(&hooks.inference))
                .await?,
        );
    }
    if let Some(deployment) = deployments.embed {
        let backend = http_backend(&deployment)?;
        inference = inference.with_embeddings(
            EmbeddingsClient::connect_with_hooks(deployment, backend, Arc::clone(&hooks.inference))
                .await?,
        );
    }
    if let Some(deployment) = deployments.rerank {
        let backend = http_backend(&deployment)?;
        inference = inference.with_rerank(
            RerankClient::connect_with_hooks(deployment, backend, Arc::clone(&hooks.inference))
                .await?,
        );
    }

    assemble(config, inference, hooks)
}

/// Builds the runtime with a caller-supplied prediction backend shared by every capability.
pub async fn build_runtime_with_backend(
    config: GatewayConfig,
    backend: Arc<dyn PredictionBackend>,
    hooks: RuntimeHooks,
) -> Result<GatewayRuntime, GatewayError> {
    let inference = InferenceGateway::connect_with_hooks(
        config.deployments.clone(),
        backend,
        Arc::clone(&hooks.inference),
    )
    .await?;
    assemble(config, inference, hooks)
}

fn assemble(
    config: GatewayConfig,
    inference: InferenceGateway,
    hooks: RuntimeHooks,
) -> Result<GatewayRuntime, GatewayError> {
    let assistant =
        AssistantClient::new(config.assistant)?.with_hooks(Arc::clone(&hooks.transport));
    let store = ConversationStore::from_kind(config.store)?;

    Ok(GatewayRuntime {
        inference,
        assistant,
        store,
        hooks,
    })
}
