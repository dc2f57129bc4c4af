//! Capability dispatch across the configured inference clients.
//!
//! ```rust
//! use std::sync::Arc;
//! use gprovider::{
//!     Capability, DeploymentConfig, GatewayDeployments, InferenceGateway, Message, ModelRequest,
//!     ModelResponse, StaticPredictionBackend,
//! };
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let backend = Arc::new(StaticPredictionBackend::new(|_handle, _row| Ok(vec![json!("Four.")])));
//! let deployments = GatewayDeployments::default().with_chat(DeploymentConfig::new(
//!     "token",
//!     "https://dr.local/api/v2",
//!     "llm-1",
//!     "llm",
//! ));
//! let gateway = InferenceGateway::connect(deployments, backend).await.expect("connects");
//!
//! assert!(gateway.supports(Capability::Chat));
//! assert!(!gateway.supports(Capability::Rerank));
//!
//! let response = gateway
//!     .dispatch(ModelRequest::chat(vec![Message::user("2+2?")]))
//!     .await
//!     .expect("chat is configured");
//! assert_eq!(response, ModelResponse::Chat("Four.".to_string()));
//! # }
//! ```

use std::sync::Arc;

use gcommon::ConfigurationError;

use crate::{
    Capability, ChatClient, DeploymentConfig, EmbeddingsClient, InferenceHooks, ModelRequest,
    ModelResponse, NoopInferenceHooks, PredictionBackend, PredictionError, RerankClient,
};

pub const ROLE_LLM: &str = "LLM";
pub const ROLE_EMBEDDING: &str = "EMBEDDING";
pub const ROLE_RERANK: &str = "RERANK";

/// Which deployment serves each capability. Unset capabilities stay unavailable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatewayDeployments {
    pub chat: Option<DeploymentConfig>,
    pub embed: Option<DeploymentConfig>,
    pub rerank: Option<DeploymentConfig>,
}

impl GatewayDeployments {
    pub fn with_chat(mut self, config: DeploymentConfig) -> Self {
        self.chat = Some(config);
        self
    }

    pub fn with_embed(mut self, config: DeploymentConfig) -> Self {
        self.embed = Some(config);
        self
    }

    pub fn with_rerank(mut self, config: DeploymentConfig) -> Self {
        self.rerank = Some(config);
        self
    }

    pub fn from_env() -> Result<Self, ConfigurationError> {
        Ok(Self {
            chat: DeploymentConfig::from_env(ROLE_LLM)?,
            embed: DeploymentConfig::from_env(ROLE_EMBEDDING)?,
            rerank: DeploymentConfig::from_env(ROLE_RERANK)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.chat.is_none() && self.embed.is_none() && self.rerank.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InferenceGateway {
    chat: Option<ChatClient>,
    embeddings: Option<EmbeddingsClient>,
    rerank: Option<RerankClient>,
}

impl InferenceGateway {
    pub async fn connect(
        deployments: GatewayDeployments,
        backend: Arc<dyn PredictionBackend>,
    ) -> Result<Self, PredictionError> {
        Self::connect_with_hooks(deployments, backend, Arc::new(NoopInferenceHooks)).await
    }

    /// Resolves every configured deployment; the first failure aborts.
    pub async fn connect_with_hooks(
        deployments: GatewayDeployments,
        backend: Arc<dyn PredictionBackend>,
        hooks: Arc<dyn InferenceHooks>,
    ) -> Result<Self, PredictionError> {
        let mut gateway = Self::default();
        if let Some(config) = deployments.chat {
            gateway.chat = Some(
                ChatClient::connect_with_hooks(config, Arc::clone(&backend), Arc::clone(&hooks))
                    .await?,
            );
        }

        if let Some(config) = deployments.embed {
            gateway.embeddings = Some(
                EmbeddingsClient::connect_with_hooks(
                    config,
                    Arc::clone(&backend),
                    Arc::clone(&hooks),
                )
                .await?,
            );
        }

        if let Some(config) = deployments.rerank {
            gateway.rerank = Some(RerankClient::connect_with_hooks(config, backend, hooks).await?);
        }

        Ok(gateway)
    }

    pub fn with_chat(mut self, client: ChatClient) -> Self {
        self.chat = Some(client);
        self
    }

    pub fn with_embeddings(mut self, client: EmbeddingsClient) -> Self {
        self.embeddings = Some(client);
        self
    }

    pub fn with_rerank(mut self, client: RerankClient) -> Self {
        self.rerank = Some(client);
        self
    }

    pub fn chat(&self) -> Option<&ChatClient> {
        self.chat.as_ref()
    }

    pub fn embeddings(&self) -> Option<&EmbeddingsClient> {
        self.embeddings.as_ref()
    }

    pub fn rerank(&self) -> Option<&RerankClient> {
        self.rerank.as_ref()
    }

    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Chat => self.chat.is_some(),
            Capability::Embed => self.embeddings.is_some(),
            Capability::Rerank => self.rerank.is_some(),
        }
    }

    pub async fn dispatch(&self, request: ModelRequest) -> Result<ModelResponse, PredictionError> {
        let capability = request.capability();
        let unconfigured =
            || PredictionError::configuration(format!("no deployment configured for {capability}"));

        match request {
            ModelRequest::Chat { messages, options } => {
                let client = self.chat.as_ref().ok_or_else(unconfigured)?;
                let text = client.chat_with_options(&messages, &options).await?;
                Ok(ModelResponse::Chat(text))
            }
            ModelRequest::Embed { texts } => {
                let client = self.embeddings.as_ref().ok_or_else(unconfigured)?;
                Ok(ModelResponse::Embed(client.embed_documents(&texts).await?))
            }
            ModelRequest::Rerank {
                query,
                documents,
                top_k,
            } => {
                let client = self.rerank.as_ref().ok_or_else(unconfigured)?;
                Ok(ModelResponse::Rerank(
                    client.rerank(&query, &documents, top_k).await?,
                ))
            }
        }
    }
}
