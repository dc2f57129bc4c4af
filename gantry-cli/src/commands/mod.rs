//! Command implementations

use std::io::Write;

use anyhow::Result;
use gantry::AssistantClient;
use serde_json::Value;

use crate::app::Commands;

pub mod ask;
pub mod chat;
pub mod documents;
pub mod history;

pub async fn run(command: Commands, client: &AssistantClient, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Health => {
            let health = client.health_check().await?;
            print_json(out, "Service Health:", &health)
        }
        Commands::Status => {
            let status = client.get_system_status().await?;
            print_json(out, "System Status:", &status)
        }
        Commands::Models => {
            let models = client.get_available_models().await?;
            print_json(out, "Available Models:", &models)
        }
        Commands::Chat => {
            let stdin = std::io::stdin();
            chat::run(client, stdin.lock(), out).await
        }
        Commands::Ask { question, context } => {
            ask::run(client, &question, context.as_deref(), out).await
        }
        Commands::Analyze {
            text,
            analysis_type,
        } => documents::analyze(client, &text, &analysis_type, out).await,
        Commands::Recommend { query, limit } => {
            documents::recommend(client, &query, limit, out).await
        }
        Commands::History { limit, session } => {
            history::show(client, session.as_deref(), limit, out).await
        }
        Commands::Clear { session } => history::clear(client, session.as_deref(), out).await,
    }
}

pub(crate) fn print_json(out: &mut impl Write, heading: &str, value: &Value) -> Result<()> {
    writeln!(out, "{heading}")?;
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Prints the reply text plus the optional confidence and model fields.
pub(crate) fn print_reply(out: &mut impl Write, response: &Value) -> Result<()> {
    writeln!(out, "Assistant: {}", gantry::response_text(response))?;
    if let Some(confidence) = response.get("confidence").and_then(Value::as_f64) {
        writeln!(out, "   Confidence: {confidence:.2}")?;
    }
    if let Some(model) = response.get("model_used").and_then(Value::as_str) {
        writeln!(out, "   Model: {model}")?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use gantry::gtransport::{
        HttpExecutor, ResilientTransport, TransportConfig, TransportRequest,
    };
    use gantry::{AssistantClient, BoxFuture, RetryPolicy, TransportError};
    use serde_json::Value;

    /// Replays canned responses and records every request path.
    #[derive(Debug, Default)]
    pub struct ScriptedService {
        responses: Mutex<VecDeque<Result<Value, TransportError>>>,
        pub requests: Mutex<Vec<(String, TransportRequest)>>,
    }

    impl HttpExecutor for ScriptedService {
        fn send<'a>(
            &'a self,
            url: String,
            request: &'a TransportRequest,
            _timeout: Duration,
        ) -> BoxFuture<'a, Result<Value, TransportError>> {
            Box::pin(async move {
                self.requests
                    .lock()
                    .expect("requests lock")
                    .push((url, request.clone()));
                self.responses
                    .lock()
                    .expect("responses lock")
                    .pop_front()
                    .unwrap_or_else(|| Err(TransportError::network("connection refused")))
            })
        }
    }

    pub fn client(
        responses: Vec<Result<Value, TransportError>>,
    ) -> (AssistantClient, Arc<ScriptedService>) {
        let service = Arc::new(ScriptedService {
            responses: Mutex::new(responses.into()),
            ..ScriptedService::default()
        });
        let config = TransportConfig::new("http://assistant.test")
            .with_retry(RetryPolicy::fixed(1, Duration::ZERO));
        let transport = ResilientTransport::with_executor(config, service.clone());
        (AssistantClient::with_transport(transport), service)
    }
}
