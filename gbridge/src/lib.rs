//! Adapters exposing the gateway's inference clients through the chat,
//! embeddings, and document-compressor contracts of an orchestration framework.

mod adapters;
mod error;
mod traits;
mod types;

pub mod prelude {
    pub use crate::{
        BaseMessage, BridgeError, BridgeErrorKind, BridgeHooks, ChatGeneration,
        ChatGenerationChunk, ChatGenerationStream, ChatModel, ChatResult, Document,
        DocumentCompressor, DocumentMetadata, Embeddings, GatewayChatModel, GatewayEmbeddings,
        GatewayReranker, NoopBridgeHooks,
    };
    pub use gcommon::{BoxFuture, GenerationOptions};
}

pub use adapters::{
    DEFAULT_TOP_N, GatewayChatModel, GatewayEmbeddings, GatewayReranker, LLM_TYPE,
};
pub use error::{BridgeError, BridgeErrorKind};
pub use traits::{BridgeHooks, ChatModel, DocumentCompressor, Embeddings, NoopBridgeHooks};
pub use types::{
    BaseMessage, ChatGeneration, ChatGenerationChunk, ChatGenerationStream, ChatResult, Document,
    DocumentMetadata,
};
