use std::sync::{Arc, Mutex};

use futures_util::StreamExt;
use gbridge::DEFAULT_TOP_N;
use gbridge::prelude::*;
use gprovider::{
    ChatClient, DeploymentConfig, EmbeddingsClient, PredictionError, PredictionErrorKind,
    RerankClient, StaticPredictionBackend,
};
use serde_json::{Value, json};

fn config(deployment_id: &str) -> DeploymentConfig {
    DeploymentConfig::new("token", "https://dr.local/api/v2", deployment_id, deployment_id)
}

fn documents() -> Vec<Document> {
    ["alpha", "beta", "gamma"]
        .iter()
        .enumerate()
        .map(|(position, text)| Document::new(*text).with_metadata("source", position))
        .collect()
}

fn score_by_content(row: &gprovider::PredictionRow) -> Result<Vec<Value>, PredictionError> {
    match row.get("document").and_then(Value::as_str) {
        Some("alpha") => Ok(vec![json!(0.1)]),
        Some("beta") => Ok(vec![json!(0.8)]),
        _ => Ok(vec![json!(0.5)]),
    }
}

#[derive(Default)]
struct FallbackRecorder {
    fallbacks: Mutex<Vec<(usize, PredictionErrorKind)>>,
}

impl BridgeHooks for FallbackRecorder {
    fn on_rerank_fallback(&self, document_count: usize, error: &PredictionError) {
        self.fallbacks
            .lock()
            .expect("fallbacks lock")
            .push((document_count, error.kind));
    }
}

#[tokio::test]
async fn chat_model_converts_messages_and_wraps_the_reply() {
    let backend = StaticPredictionBackend::new(|_handle, _row| Ok(vec![json!("Four.")]));
    let client = ChatClient::connect(config("llm"), Arc::new(backend.clone()))
        .await
        .expect("chat client connects");
    let model = GatewayChatModel::new(client);

    let messages = vec![
        BaseMessage::system("be terse"),
        BaseMessage::human("2+2?"),
        BaseMessage::Tool {
            tool_call_id: "call_1".to_string(),
            content: json!({ "sum": 4 }),
        },
    ];
    let result = model.generate(&messages).await.expect("generation succeeds");

    assert_eq!(result.generations.len(), 1);
    assert_eq!(result.generations[0].message, BaseMessage::ai("Four."));
    assert_eq!(
        backend.recorded_rows()[0].1.get("prompt"),
        Some(&json!(
            "System: be terse\nUser: 2+2?\nUser: {\"sum\":4}\nAssistant:"
        ))
    );
}

#[tokio::test]
async fn chat_model_stream_yields_exactly_one_full_chunk() {
    let backend = StaticPredictionBackend::new(|_handle, _row| Ok(vec![json!("whole answer")]));
    let client = ChatClient::connect(config("llm"), Arc::new(backend))
        .await
        .expect("chat client connects");
    let model = GatewayChatModel::new(client);

    let messages = vec![BaseMessage::human("hi")];
    let chunks = model.stream(&messages).collect::<Vec<_>>().await;

    assert_eq!(chunks.len(), 1);
    let chunk = chunks
        .into_iter()
        .next()
        .expect("one chunk")
        .expect("chunk is ok");
    assert_eq!(chunk.message, BaseMessage::ai("whole answer"));
}

#[tokio::test]
async fn chat_model_surfaces_prediction_failures() {
    let backend = StaticPredictionBackend::new(|_handle, _row| Ok(vec![]));
    let client = ChatClient::connect(config("llm"), Arc::new(backend))
        .await
        .expect("chat client connects");
    let model = GatewayChatModel::new(client);

    let error = model
        .generate(&[BaseMessage::human("hi")])
        .await
        .expect_err("empty prediction must fail");
    assert_eq!(error.kind, BridgeErrorKind::Prediction);
    assert_eq!(error.prediction_kind, Some(PredictionErrorKind::EmptyResult));
}

#[tokio::test]
async fn embeddings_pass_through() {
    let backend = StaticPredictionBackend::new(|_handle, _row| Ok(vec![json!([0.5, 0.5])]));
    let client = EmbeddingsClient::connect(config("embed"), Arc::new(backend))
        .await
        .expect("embeddings client connects");
    let embeddings = GatewayEmbeddings::new(client);

    let vectors = embeddings
        .embed_documents(&["a".to_string(), "b".to_string()])
        .await
        .expect("documents embed");
    assert_eq!(vectors, vec![vec![0.5, 0.5], vec![0.5, 0.5]]);
    assert_eq!(
        embeddings.embed_query("q").await.expect("query embeds"),
        vec![0.5, 0.5]
    );
}

#[tokio::test]
async fn reranker_orders_documents_and_annotates_metadata() {
    let backend = StaticPredictionBackend::new(|_handle, row| score_by_content(row));
    let client = RerankClient::connect(config("rerank"), Arc::new(backend))
        .await
        .expect("rerank client connects");
    let reranker = GatewayReranker::new(client).with_top_n(2);

    let compressed = reranker
        .compress_documents(documents(), "greek letters")
        .await
        .expect("compression never fails");

    assert_eq!(compressed.len(), 2);
    assert_eq!(compressed[0].page_content, "beta");
    assert_eq!(compressed[0].metadata.get("source"), Some(&json!(1)));
    assert_eq!(compressed[0].metadata.get("rerank_score"), Some(&json!(0.8)));
    assert_eq!(compressed[0].metadata.get("rerank_rank"), Some(&json!(1)));
    assert_eq!(compressed[1].page_content, "gamma");
    assert_eq!(compressed[1].metadata.get("rerank_rank"), Some(&json!(2)));
}

#[tokio::test]
async fn reranker_falls_back_to_original_order_when_rerank_fails() {
    let hooks = Arc::new(FallbackRecorder::default());
    let backend = StaticPredictionBackend::new(|_handle, _row| {
        Err(PredictionError::transport("all 3 attempts failed: connection reset"))
    });
    let client = RerankClient::connect(config("rerank"), Arc::new(backend))
        .await
        .expect("rerank client connects");
    let reranker = GatewayReranker::new(client)
        .with_top_n(2)
        .with_hooks(hooks.clone());

    let compressed = reranker
        .compress_documents(documents(), "greek letters")
        .await
        .expect("compression never fails");

    assert_eq!(
        compressed
            .iter()
            .map(|document| document.page_content.as_str())
            .collect::<Vec<_>>(),
        vec!["alpha", "beta"]
    );
    assert!(compressed[0].metadata.get("rerank_score").is_none());
    assert_eq!(
        *hooks.fallbacks.lock().expect("fallbacks lock"),
        vec![(3, PredictionErrorKind::Transport)]
    );
}

#[tokio::test]
async fn reranker_defaults_to_ten_documents() {
    let backend = StaticPredictionBackend::new(|_handle, _row| Ok(vec![json!(0.5)]));
    let client = RerankClient::connect(config("rerank"), Arc::new(backend))
        .await
        .expect("rerank client connects");
    let reranker = GatewayReranker::new(client);
    assert_eq!(reranker.top_n(), DEFAULT_TOP_N);

    let many = (0..15)
        .map(|index| Document::new(format!("doc {index}")))
        .collect::<Vec<_>>();
    let compressed = reranker
        .compress_documents(many, "q")
        .await
        .expect("compression never fails");

    assert_eq!(compressed.len(), 10);
    assert_eq!(compressed[0].page_content, "doc 0");
    assert_eq!(compressed[9].page_content, "doc 9");
}
