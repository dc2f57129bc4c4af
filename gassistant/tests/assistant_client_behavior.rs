use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gassistant::prelude::*;
use gassistant::{AnalysisRequest, DEFAULT_HISTORY_LIMIT};
use gcommon::BoxFuture;
use gtransport::{HttpExecutor, Method, ResilientTransport, TransportRequest};
use serde_json::{Value, json};

#[derive(Debug, Default)]
struct FakeAssistant {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    calls: Mutex<Vec<(String, TransportRequest)>>,
}

impl FakeAssistant {
    fn replying(responses: Vec<Result<Value, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        })
    }

    fn calls(&self) -> Vec<(String, TransportRequest)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl HttpExecutor for FakeAssistant {
    fn send<'a>(
        &'a self,
        url: String,
        request: &'a TransportRequest,
        _timeout: Duration,
    ) -> BoxFuture<'a, Result<Value, TransportError>> {
        Box::pin(async move {
            self.calls
                .lock()
                .expect("calls lock")
                .push((url, request.clone()));
            self.responses
                .lock()
                .expect("responses lock")
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::network("connection refused")))
        })
    }
}

fn client(executor: Arc<FakeAssistant>, attempts: u32) -> AssistantClient {
    let config = AssistantConfig::new("http://assistant.local:8000")
        .with_retry_attempts(attempts)
        .with_retry_delay(Duration::from_millis(1));
    AssistantClient::with_transport(ResilientTransport::with_executor(
        config.transport_config(),
        executor,
    ))
}

#[tokio::test]
async fn chat_posts_message_context_and_extra_params() {
    let assistant = FakeAssistant::replying(vec![Ok(json!({
        "response": "Hello!",
        "model_used": "assistant-llm"
    }))]);
    let client = client(assistant.clone(), 3);

    let reply = client
        .chat(&ChatRequest::new("Hi").with_param("temperature", 0.3))
        .await
        .expect("chat succeeds");

    assert_eq!(reply["model_used"], "assistant-llm");
    let calls = assistant.calls();
    assert_eq!(calls[0].0, "http://assistant.local:8000/chat");
    assert_eq!(calls[0].1.method, Method::Post);
    assert_eq!(
        calls[0].1.body,
        Some(json!({ "message": "Hi", "context": {}, "temperature": 0.3 }))
    );
}

#[tokio::test]
async fn recommendations_and_analysis_use_their_endpoints() {
    let assistant = FakeAssistant::replying(vec![
        Ok(json!({ "recommendations": [] })),
        Ok(json!({ "summary": "short" })),
    ]);
    let client = client(assistant.clone(), 1);

    client
        .get_recommendations(&RecommendationRequest::new("books").with_limit(3))
        .await
        .expect("recommendations succeed");
    client
        .analyze_document(&AnalysisRequest::new("Some text"))
        .await
        .expect("analysis succeeds");

    let calls = assistant.calls();
    assert_eq!(calls[0].0, "http://assistant.local:8000/recommendations");
    assert_eq!(calls[0].1.body, Some(json!({ "query": "books", "limit": 3 })));
    assert_eq!(calls[1].0, "http://assistant.local:8000/analyze");
    assert_eq!(
        calls[1].1.body,
        Some(json!({ "document_text": "Some text", "analysis_type": "general" }))
    );
}

#[tokio::test]
async fn history_sends_limit_and_optional_session_as_query() {
    let assistant = FakeAssistant::replying(vec![Ok(json!({ "messages": [] })), Ok(json!({}))]);
    let client = client(assistant.clone(), 1);

    client
        .get_conversation_history(None, DEFAULT_HISTORY_LIMIT)
        .await
        .expect("history succeeds");
    client
        .get_conversation_history(Some("s-1"), 10)
        .await
        .expect("history succeeds");

    let calls = assistant.calls();
    assert_eq!(calls[0].0, "http://assistant.local:8000/conversations");
    assert_eq!(calls[0].1.method, Method::Get);
    assert_eq!(calls[0].1.query, vec![("limit".to_string(), "50".to_string())]);
    assert_eq!(
        calls[1].1.query,
        vec![
            ("limit".to_string(), "10".to_string()),
            ("session_id".to_string(), "s-1".to_string())
        ]
    );
}

#[tokio::test]
async fn clear_conversation_sends_session_only_when_given() {
    let assistant = FakeAssistant::replying(vec![
        Ok(json!({ "status": "cleared" })),
        Ok(json!({ "status": "cleared" })),
    ]);
    let client = client(assistant.clone(), 1);

    client.clear_conversation(None).await.expect("clear succeeds");
    client
        .clear_conversation(Some("s-9"))
        .await
        .expect("clear succeeds");

    let calls = assistant.calls();
    assert_eq!(calls[0].0, "http://assistant.local:8000/conversations/clear");
    assert_eq!(calls[0].1.body, Some(json!({})));
    assert_eq!(calls[1].1.body, Some(json!({ "session_id": "s-9" })));
}

#[tokio::test]
async fn read_only_endpoints_return_json_unchanged() {
    let health = json!({ "status": "healthy", "version": "1.0" });
    let assistant = FakeAssistant::replying(vec![
        Ok(health.clone()),
        Ok(json!({ "models": ["a", "b"] })),
        Ok(json!({ "uptime": 12 })),
    ]);
    let client = client(assistant.clone(), 1);

    assert_eq!(client.health_check().await.expect("health"), health);
    assert_eq!(
        client.get_available_models().await.expect("models"),
        json!({ "models": ["a", "b"] })
    );
    assert_eq!(
        client.get_system_status().await.expect("status"),
        json!({ "uptime": 12 })
    );

    let urls = assistant
        .calls()
        .into_iter()
        .map(|(url, _)| url)
        .collect::<Vec<_>>();
    assert_eq!(
        urls,
        vec![
            "http://assistant.local:8000/health",
            "http://assistant.local:8000/models",
            "http://assistant.local:8000/status"
        ]
    );
}

#[tokio::test]
async fn unreachable_service_fails_after_every_attempt() {
    let assistant = FakeAssistant::replying(Vec::new());
    let client = client(assistant.clone(), 3);

    let error = client
        .health_check()
        .await
        .expect_err("service is down");

    assert_eq!(assistant.calls().len(), 3);
    assert_eq!(error.kind, TransportErrorKind::Network);
    assert_eq!(error.attempts, 3);
    assert!(error.to_string().contains("all 3 attempts failed"));
}

#[tokio::test]
async fn quick_chat_extracts_the_response_field() {
    let assistant = FakeAssistant::replying(vec![
        Ok(json!({ "response": "Sure thing." })),
        Ok(json!({ "detail": "nothing to say" })),
    ]);
    let client = client(assistant, 1);

    assert_eq!(client.quick_chat("hi").await.expect("reply"), "Sure thing.");
    assert_eq!(
        client.quick_chat("hi again").await.expect("reply"),
        "No response received"
    );
}
