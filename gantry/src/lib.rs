//! Unified facade over the gantry workspace crates.
//!
//! This crate is meant to be the single dependency for most applications. It
//! re-exports the gateway crates, loads [`GatewayConfig`] from the environment,
//! and wires the inference gateway, assistant client, and conversation store
//! into one [`GatewayRuntime`].
//!
//! ```rust
//! use std::sync::Arc;
//! use gantry::prelude::*;
//! use gantry::{DeploymentConfig, GatewayDeployments, StaticPredictionBackend};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let backend = Arc::new(StaticPredictionBackend::new(|_handle, _row| {
//!     Ok(vec![serde_json::json!("Four.")])
//! }));
//! let config = GatewayConfig::default().with_deployments(
//!     GatewayDeployments::default().with_chat(DeploymentConfig::new(
//!         "token",
//!         "https://dr.local/api/v2",
//!         "llm-1",
//!         "llm",
//!     )),
//! );
//!
//! let runtime = build_runtime_with_backend(config, backend, RuntimeHooks::noop())
//!     .await
//!     .expect("runtime builds");
//! let reply = runtime
//!     .inference
//!     .dispatch(ModelRequest::chat(gantry_messages![user => "2+2?"]))
//!     .await
//!     .expect("chat is configured");
//! assert_eq!(reply.into_text().as_deref(), Some("Four."));
//! # }
//! ```

mod config;
mod error;
mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use gassistant;
pub use gbridge;
pub use gcommon;
pub use gmemory;
pub use gobserve;
pub use gprovider;
pub use gtransport;

pub use config::{GatewayConfig, ensure_env_loaded};
pub use error::{GatewayError, GatewayErrorKind};

pub use gassistant::{
    AnalysisRequest, AssistantClient, AssistantConfig, ChatRequest, RecommendationRequest,
    response_text,
};
pub use gbridge::{
    BaseMessage, BridgeError, BridgeErrorKind, BridgeHooks, ChatModel, ChatResult, Document,
    DocumentCompressor, Embeddings, GatewayChatModel, GatewayEmbeddings, GatewayReranker,
};
pub use gcommon::{
    BoxFuture, ConfigurationError, GenerationOptions, MetadataMap, SecretString, SessionId,
};
pub use gmemory::{
    ConversationStore, ConversationTurn, MemoryError, MemoryErrorKind, SessionBackend,
    SessionRecord, StoreKind,
};
pub use gobserve::{MetricsObservabilityHooks, TracingObservabilityHooks};
pub use gprovider::{
    Capability, ChatClient, DeploymentConfig, EmbeddingsClient, GatewayDeployments,
    InferenceGateway, InferenceHooks, Message, ModelRequest, ModelResponse, PredictionBackend,
    PredictionError, PredictionErrorKind, RankedDocument, RerankClient, Role,
    StaticPredictionBackend, format_messages_to_prompt,
};
#[cfg(feature = "http-backend")]
pub use gprovider::HttpPredictionBackend;
pub use gtransport::{RetryPolicy, TransportError, TransportErrorKind, TransportHooks};

#[cfg(feature = "http-backend")]
pub use runtime::{build_runtime, build_runtime_with_hooks};
pub use runtime::{GatewayRuntime, RuntimeHooks, build_runtime_with_backend};
pub use util::{
    assistant_message, documents, session, system_message, turn_from_message, user_message,
};
