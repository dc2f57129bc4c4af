//! Common imports for most gantry applications.

pub use crate::{
    assistant_message, documents, session, system_message, turn_from_message, user_message,
};
pub use crate::{build_runtime_with_backend, ensure_env_loaded};
#[cfg(feature = "http-backend")]
pub use crate::{build_runtime, build_runtime_with_hooks};
pub use crate::{gantry_messages, gantry_msg};
pub use crate::{
    AssistantClient, AssistantConfig, BoxFuture, Capability, ChatModel, ConversationStore,
    ConversationTurn, Document, DocumentCompressor, Embeddings, GatewayConfig, GatewayError,
    GatewayErrorKind, GatewayRuntime, InferenceGateway, Message, ModelRequest, ModelResponse,
    PredictionError, Role, RuntimeHooks, SessionId, StoreKind, TransportError,
};
