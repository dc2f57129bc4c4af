//! Inference adapters for chat completion, embeddings, and reranking.
//!
//! Every client binds to one deployment through an injected
//! [`PredictionBackend`] and resolves that deployment before it is returned.
//! With the default `http-backend` feature, `HttpPredictionBackend` talks to
//! the provider's REST API through `gtransport`.
//!
//! ```rust
//! use std::sync::Arc;
//! use gprovider::{ChatClient, DeploymentConfig, Message, StaticPredictionBackend};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let backend = Arc::new(StaticPredictionBackend::new(|_handle, _row| Ok(vec![json!("Four.")])));
//! let config = DeploymentConfig::new("token", "https://dr.local/api/v2", "llm-1", "llm");
//! let client = ChatClient::connect(config, backend).await.expect("deployment resolves");
//!
//! let answer = client.chat(&[Message::user("2+2?")]).await.expect("prediction succeeds");
//! assert_eq!(answer, "Four.");
//! # }
//! ```

mod backend;
mod binding;
mod chat;
mod decode;
mod deployment;
mod embeddings;
mod error;
mod gateway;
mod hooks;
#[cfg(feature = "http-backend")]
mod http;
mod model;
pub mod prelude;
mod rerank;

pub use backend::{PredictionBackend, PredictionRow, StaticPredictionBackend};
pub use chat::{ChatClient, format_messages_to_prompt};
pub use decode::{decode_score, decode_text, decode_vector};
pub use deployment::{
    DeploymentConfig, DeploymentHandle, ENV_API_TOKEN, ENV_ENDPOINT, ENV_MAX_RETRIES,
    ENV_TIMEOUT_SECS,
};
pub use embeddings::EmbeddingsClient;
pub use error::{PredictionError, PredictionErrorKind};
pub use gateway::{GatewayDeployments, InferenceGateway, ROLE_EMBEDDING, ROLE_LLM, ROLE_RERANK};
pub use hooks::{InferenceHooks, NoopInferenceHooks};
#[cfg(feature = "http-backend")]
pub use http::HttpPredictionBackend;
pub use model::{Capability, Message, ModelRequest, ModelResponse, RankedDocument, Role};
pub use rerank::RerankClient;
