//! Capability traits the orchestration framework programs against.

use gcommon::BoxFuture;
use gprovider::PredictionError;

use crate::{BaseMessage, BridgeError, ChatGenerationStream, ChatResult, Document};

pub trait ChatModel: Send + Sync {
    fn llm_type(&self) -> &'static str;

    fn generate<'a>(
        &'a self,
        messages: &'a [BaseMessage],
    ) -> BoxFuture<'a, Result<ChatResult, BridgeError>>;

    fn stream<'a>(&'a self, messages: &'a [BaseMessage]) -> ChatGenerationStream<'a>;
}

pub trait Embeddings: Send + Sync {
    fn embed_documents<'a>(
        &'a self,
        texts: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Vec<f32>>, BridgeError>>;

    fn embed_query<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, BridgeError>>;
}

pub trait DocumentCompressor: Send + Sync {
    fn compress_documents<'a>(
        &'a self,
        documents: Vec<Document>,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Document>, BridgeError>>;
}

pub trait BridgeHooks: Send + Sync {
    /// Reranking failed and the original order was returned instead.
    fn on_rerank_fallback(&self, _document_count: usize, _error: &PredictionError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBridgeHooks;

impl BridgeHooks for NoopBridgeHooks {}
