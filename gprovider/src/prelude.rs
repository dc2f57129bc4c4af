//! Common `gprovider` imports for downstream crates.

#[cfg(feature = "http-backend")]
pub use crate::HttpPredictionBackend;
pub use crate::{
    Capability, ChatClient, DeploymentConfig, DeploymentHandle, EmbeddingsClient,
    GatewayDeployments, InferenceGateway, InferenceHooks, Message, ModelRequest, ModelResponse,
    NoopInferenceHooks, PredictionBackend, PredictionError, PredictionErrorKind, PredictionRow,
    RankedDocument, RerankClient, Role, StaticPredictionBackend, format_messages_to_prompt,
};
pub use gcommon::{BoxFuture, GenerationOptions};
