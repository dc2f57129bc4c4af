//! Query/document relevance scoring over a rerank deployment.

use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::Value;

use crate::binding::DeploymentBinding;
use crate::decode::{decode_score, first_prediction};
use crate::{
    Capability, DeploymentConfig, DeploymentHandle, InferenceHooks, NoopInferenceHooks,
    PredictionBackend, PredictionError, PredictionRow, RankedDocument,
};

#[derive(Debug, Clone)]
pub struct RerankClient {
    binding: DeploymentBinding,
}

impl RerankClient {
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
        let binding =
            DeploymentBinding::connect(Capability::Rerank, config, backend, hooks).await?;
        Ok(Self { binding })
    }

    pub fn config(&self) -> &DeploymentConfig {
        self.binding.config()
    }

    pub fn deployment(&self) -> &DeploymentHandle {
        self.binding.handle()
    }

    /// Scores each document against `query`, best first.
    ///
    /// Documents whose call yields no usable score are dropped and reported
    /// through the hooks. Transport and resolution failures abort the call.
    pub async fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_k: Option<usize>,
    ) -> Result<Vec<RankedDocument>, PredictionError> {
        let mut ranked = Vec::with_capacity(documents.len());
        for (index, document) in documents.iter().enumerate() {
            let mut row = PredictionRow::new();
            row.insert("query".to_string(), Value::String(query.to_string()));
            row.insert("document".to_string(), Value::String(document.clone()));
            row.insert("document_index".to_string(), Value::from(index));

            let score = match self.score(row).await {
                Ok(score) => score,
                Err(error) if error.is_missing_result() => {
                    self.binding.hooks().on_rerank_skip(
                        &self.binding.handle().deployment_id,
                        index,
                        &error,
                    );
                    continue;
                }
                Err(error) => return Err(error),
            };

            ranked.push(RankedDocument {
                document: document.clone(),
                score,
                index,
            });
        }

        // Scores are never NaN here, so equal scores (including -0.0 and 0.0) compare Equal.
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        if let Some(top_k) = top_k {
            ranked.truncate(top_k);
        }

        Ok(ranked)
    }

    async fn score(&self, row: PredictionRow) -> Result<f64, PredictionError> {
        let prediction = first_prediction(self.binding.predict(row).await?)
            .ok_or_else(|| PredictionError::empty_result("no rerank score returned"))?;
        decode_score(&prediction)
    }
}
