//! HTTP facade over the assistant service.

use std::sync::Arc;

use gtransport::{ResilientTransport, TransportError, TransportHooks, TransportRequest};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{AnalysisRequest, AssistantConfig, ChatRequest, RecommendationRequest};

pub const DEFAULT_HISTORY_LIMIT: u32 = 50;
pub const NO_RESPONSE: &str = "No response received";

/// Every call goes through the retrying transport and returns the service's JSON unchanged.
///
/// ```rust
/// use gassistant::{AssistantClient, AssistantConfig};
///
/// let client = AssistantClient::new(AssistantConfig::new("http://assistant.internal:8000"))
///     .expect("client builds");
/// assert_eq!(client.transport().url_for("/health"), "http://assistant.internal:8000/health");
/// ```
#[derive(Debug, Clone)]
pub struct AssistantClient {
    transport: ResilientTransport,
}

impl AssistantClient {
    pub fn new(config: AssistantConfig) -> Result<Self, TransportError> {
        Ok(Self::with_transport(ResilientTransport::new(
            config.transport_config(),
        )?))
    }

    pub fn with_transport(transport: ResilientTransport) -> Self {
        Self { transport }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn TransportHooks>) -> Self {
        self.transport = self.transport.with_hooks(hooks);
        self
    }

    pub fn transport(&self) -> &ResilientTransport {
        &self.transport
    }

    pub async fn health_check(&self) -> Result<Value, TransportError> {
        self.transport.get("/health").await
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<Value, TransportError> {
        self.transport.post("/chat", to_body(request)?).await
    }

    /// Same as [`Self::chat`]; kept for callers phrasing turns as questions.
    pub async fn ask_question(&self, request: &ChatRequest) -> Result<Value, TransportError> {
        self.chat(request).await
    }

    pub async fn get_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Value, TransportError> {
        self.transport
            .post("/recommendations", to_body(request)?)
            .await
    }

    pub async fn analyze_document(
        &self,
        request: &AnalysisRequest,
    ) -> Result<Value, TransportError> {
        self.transport.post("/analyze", to_body(request)?).await
    }

    pub async fn get_conversation_history(
        &self,
        session_id: Option<&str>,
        limit: u32,
    ) -> Result<Value, TransportError> {
        let mut request =
            TransportRequest::get("/conversations").with_query("limit", limit.to_string());
        if let Some(session_id) = session_id.filter(|id| !id.is_empty()) {
            request = request.with_query("session_id", session_id);
        }

        self.transport.execute(request).await
    }

    pub async fn clear_conversation(
        &self,
        session_id: Option<&str>,
    ) -> Result<Value, TransportError> {
        let mut body = Map::new();
        if let Some(session_id) = session_id.filter(|id| !id.is_empty()) {
            body.insert("session_id".to_string(), Value::String(session_id.to_string()));
        }

        self.transport
            .post("/conversations/clear", Value::Object(body))
            .await
    }

    pub async fn get_available_models(&self) -> Result<Value, TransportError> {
        self.transport.get("/models").await
    }

    pub async fn get_system_status(&self) -> Result<Value, TransportError> {
        self.transport.get("/status").await
    }

    /// Sends one message and returns only the reply text.
    pub async fn quick_chat(&self, message: &str) -> Result<String, TransportError> {
        let response = self.chat(&ChatRequest::new(message)).await?;
        Ok(response_text(&response))
    }
}

/// The `response` field of a chat reply, or a placeholder when it is absent.
pub fn response_text(response: &Value) -> String {
    match response.get("response") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => NO_RESPONSE.to_string(),
        Some(other) => other.to_string(),
    }
}

fn to_body<T: Serialize>(request: &T) -> Result<Value, TransportError> {
    serde_json::to_value(request).map_err(|error| {
        TransportError::invalid_request(format!("request does not serialize: {error}"))
    })
}
