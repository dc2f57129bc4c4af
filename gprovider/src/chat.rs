//! Chat completion over a text-generation deployment.
//!
//! ```rust
//! use gprovider::{Message, format_messages_to_prompt};
//!
//! let prompt = format_messages_to_prompt(&[
//!     Message::system("be terse"),
//!     Message::user("2+2?"),
//! ]);
//! assert_eq!(prompt, "System: be terse\nUser: 2+2?\nAssistant:");
//! ```

use std::sync::Arc;

use gcommon::GenerationOptions;
use serde_json::Value;

use crate::binding::DeploymentBinding;
use crate::decode::{decode_text, first_prediction};
use crate::{
    Capability, DeploymentConfig, DeploymentHandle, InferenceHooks, Message, NoopInferenceHooks,
    PredictionBackend, PredictionError, PredictionRow,
};

/// Flattens role-tagged messages into one prompt ending with an open assistant turn.
pub fn format_messages_to_prompt(messages: &[Message]) -> String {
    let mut prompt = String::new();
    for message in messages {
        prompt.push_str(message.role.prompt_prefix());
        prompt.push_str(": ");
        prompt.push_str(&message.content);
        prompt.push('\n');
    }

    prompt.push_str("Assistant:");
    prompt
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    binding: DeploymentBinding,
}

impl ChatClient {
    /// Resolves the deployment before returning.
    pub async fn connect(
        config: DeploymentConfig,
        backend: Arc<dyn PredictionBackend>,
    ) -> Result<Self, PredictionError> {
        Self::connect_with_hooks(config, backend, Arc::new(NoopInferenceHooks)).await
    }

    pub async fn connect_with_hooks(
        config: DeploymentConfig,
        backend: Arc<dyn PredictionBackend>,
        hooks: Arc<dyn InferenceHooks>,
    ) -> Result<Self, PredictionError> {
        let binding = DeploymentBinding::connect(Capability::Chat, config, backend, hooks).await?;
        Ok(Self { binding })
    }

    pub fn config(&self) -> &DeploymentConfig {
        self.binding.config()
    }

    pub fn deployment(&self) -> &DeploymentHandle {
        self.binding.handle()
    }

    /// Sends a raw prompt. Non-string predictions are returned as JSON text.
    pub async fn predict(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, PredictionError> {
        let mut row = PredictionRow::new();
        row.insert("prompt".to_string(), Value::String(prompt.to_string()));
        if let Some(temperature) = options.temperature {
            row.insert("temperature".to_string(), Value::from(temperature));
        }
        if let Some(max_tokens) = options.max_tokens {
            row.insert("max_tokens".to_string(), Value::from(max_tokens));
        }
        if let Some(top_k) = options.top_k {
            row.insert("top_k".to_string(), Value::from(top_k));
        }

        let prediction = first_prediction(self.binding.predict(row).await?)
            .ok_or_else(|| PredictionError::empty_result("no prediction returned"))?;

        Ok(decode_text(&prediction))
    }

    pub async fn chat(&self, messages: &[Message]) -> Result<String, PredictionError> {
        self.chat_with_options(messages, &GenerationOptions::default())
            .await
    }

    pub async fn chat_with_options(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<String, PredictionError> {
        let prompt = format_messages_to_prompt(messages);
        self.predict(&prompt, options).await
    }
}
