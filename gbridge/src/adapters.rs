//! Framework adapters over the gateway's inference clients.
//!
//! ```rust
//! use std::sync::Arc;
//! use gbridge::{BaseMessage, ChatModel, GatewayChatModel};
//! use gprovider::{ChatClient, DeploymentConfig, StaticPredictionBackend};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let backend = Arc::new(StaticPredictionBackend::new(|_handle, _row| Ok(vec![json!("Four.")])));
//! let config = DeploymentConfig::new("token", "https://dr.local/api/v2", "llm-1", "llm");
//! let client = ChatClient::connect(config, backend).await.expect("deployment resolves");
//! let model = GatewayChatModel::new(client);
//!
//! let result = model.generate(&[BaseMessage::human("2+2?")]).await.expect("generation");
//! assert_eq!(result.generations[0].message, BaseMessage::ai("Four."));
//! assert_eq!(model.llm_type(), "gantry");
//! # }
//! ```

use std::sync::Arc;

use gcommon::{BoxFuture, GenerationOptions};
use gprovider::{ChatClient, EmbeddingsClient, Message, RerankClient};
use serde_json::Value;

use crate::{
    BaseMessage, BridgeError, BridgeHooks, ChatGenerationChunk, ChatGenerationStream, ChatModel,
    ChatResult, Document, DocumentCompressor, Embeddings, NoopBridgeHooks,
};

pub const LLM_TYPE: &str = "gantry";
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone)]
pub struct GatewayChatModel {
    client: ChatClient,
    options: GenerationOptions,
}

impl GatewayChatModel {
    pub fn new(client: ChatClient) -> Self {
        Self {
            client,
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn client(&self) -> &ChatClient {
        &self.client
    }
}

impl ChatModel for GatewayChatModel {
    fn llm_type(&self) -> &'static str {
        LLM_TYPE
    }

    fn generate<'a>(
        &'a self,
        messages: &'a [BaseMessage],
    ) -> BoxFuture<'a, Result<ChatResult, BridgeError>> {
        Box::pin(async move {
            let messages = messages
                .iter()
                .map(BaseMessage::to_message)
                .collect::<Vec<Message>>();
            let text = self
                .client
                .chat_with_options(&messages, &self.options)
                .await?;

            Ok(ChatResult::single(BaseMessage::Ai(text)))
        })
    }

    /// The deployment has no incremental output, so the stream carries one
    /// chunk holding the whole response.
    fn stream<'a>(&'a self, messages: &'a [BaseMessage]) -> ChatGenerationStream<'a> {
        Box::pin(async_stream::stream! {
            match self.generate(messages).await {
                Ok(result) => {
                    if let Some(generation) = result.generations.into_iter().next() {
                        yield Ok(ChatGenerationChunk { message: generation.message });
                    }
                }
                Err(error) => yield Err(error),
            }
        })
    }
}

#[derive(Debug, Clone)]
pub struct GatewayEmbeddings {
    client: EmbeddingsClient,
}

impl GatewayEmbeddings {
    pub fn new(client: EmbeddingsClient) -> Self {
        Self { client }
    }
}

impl Embeddings for GatewayEmbeddings {
    fn embed_documents<'a>(
        &'a self,
        texts: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Vec<f32>>, BridgeError>> {
        Box::pin(async move { Ok(self.client.embed_documents(texts).await?) })
    }

    fn embed_query<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, BridgeError>> {
        Box::pin(async move { Ok(self.client.embed_query(text).await?) })
    }
}

/// Reorders retrieved documents by relevance, keeping the best `top_n`.
///
/// Never fails: when reranking errors the input order is kept and truncated.
#[derive(Clone)]
pub struct GatewayReranker {
    client: RerankClient,
    top_n: usize,
    hooks: Arc<dyn BridgeHooks>,
}

impl GatewayReranker {
    pub fn new(client: RerankClient) -> Self {
        Self {
            client,
            top_n: DEFAULT_TOP_N,
            hooks: Arc::new(NoopBridgeHooks),
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn BridgeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }
}

impl std::fmt::Debug for GatewayReranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayReranker")
            .field("client", &self.client)
            .field("top_n", &self.top_n)
            .finish_non_exhaustive()
    }
}

impl DocumentCompressor for GatewayReranker {
    fn compress_documents<'a>(
        &'a self,
        mut documents: Vec<Document>,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Document>, BridgeError>> {
        Box::pin(async move {
            let texts = documents
                .iter()
                .map(|document| document.page_content.clone())
                .collect::<Vec<_>>();

            let ranked = match self.client.rerank(query, &texts, Some(self.top_n)).await {
                Ok(ranked) => ranked,
                Err(error) => {
                    self.hooks.on_rerank_fallback(documents.len(), &error);
                    documents.truncate(self.top_n);
                    return Ok(documents);
                }
            };

            let reranked = ranked
                .into_iter()
                .filter_map(|result| {
                    documents
                        .get(result.index)
                        .map(|original| (original.clone(), result.score))
                })
                .enumerate()
                .map(|(position, (mut document, score))| {
                    document
                        .metadata
                        .insert("rerank_score".to_string(), Value::from(score));
                    document
                        .metadata
                        .insert("rerank_rank".to_string(), Value::from(position + 1));
                    document
                })
                .collect();

            Ok(reranked)
        })
    }
}
