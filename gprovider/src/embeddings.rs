//! Text embeddings over an embedding deployment.

use std::sync::Arc;

use serde_json::Value;

use crate::binding::DeploymentBinding;
use crate::decode::{decode_vector, first_prediction, truncate_for_message};
use crate::{
    Capability, DeploymentConfig, DeploymentHandle, InferenceHooks, NoopInferenceHooks,
    PredictionBackend, PredictionError, PredictionRow,
};

const MESSAGE_TEXT_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct EmbeddingsClient {
    binding: DeploymentBinding,
}

impl EmbeddingsClient {
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
        let binding = DeploymentBinding::connect(Capability::Embed, config, backend, hooks).await?;
        Ok(Self { binding })
    }

    pub fn config(&self) -> &DeploymentConfig {
        self.binding.config()
    }

    pub fn deployment(&self) -> &DeploymentHandle {
        self.binding.handle()
    }

    /// One vector per text, in input order. Any missing result fails the whole batch.
    pub async fn embed_documents(
        &self,
        texts: &[String],
    ) -> Result<Vec<Vec<f32>>, PredictionError> {
        let mut vectors: Vec<Vec<f32>> = Vec::with_capacity(texts.len());
        for text in texts {
            let mut row = PredictionRow::new();
            row.insert("text".to_string(), Value::String(text.clone()));

            let Some(prediction) = first_prediction(self.binding.predict(row).await?) else {
                return Err(PredictionError::empty_result(format!(
                    "no embedding returned for text: {}",
                    truncate_for_message(text, MESSAGE_TEXT_LIMIT)
                )));
            };

            let vector = decode_vector(&prediction).map_err(|error| {
                PredictionError::decode(format!(
                    "{} (text: {})",
                    error.message,
                    truncate_for_message(text, MESSAGE_TEXT_LIMIT)
                ))
            })?;

            if let Some(expected) = vectors.first().map(Vec::len) {
                if vector.len() != expected {
                    return Err(PredictionError::decode(format!(
                        "embedding dimension {} does not match {expected} for text: {}",
                        vector.len(),
                        truncate_for_message(text, MESSAGE_TEXT_LIMIT)
                    )));
                }
            }

            vectors.push(vector);
        }

        Ok(vectors)
    }

    /// Returns an empty vector rather than failing when the batch comes back empty.
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>, PredictionError> {
        let vectors = self.embed_documents(&[text.to_string()]).await?;
        Ok(vectors.into_iter().next().unwrap_or_default())
    }
}
