//! Injected prediction capability and a scripted backend for tests.
//!
//! ```rust
//! use gprovider::{DeploymentConfig, PredictionBackend, StaticPredictionBackend};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let backend = StaticPredictionBackend::new(|_handle, _row| Ok(vec![json!("Four.")]))
//!     .with_deployment("llm-1", "Assistant LLM");
//! let config = DeploymentConfig::new("token", "https://dr.local/api/v2", "llm-1", "llm");
//!
//! let handle = backend.resolve_deployment(&config).await.expect("known deployment");
//! assert_eq!(handle.label.as_deref(), Some("Assistant LLM"));
//!
//! let missing = DeploymentConfig::new("token", "https://dr.local/api/v2", "other", "llm");
//! assert!(backend.resolve_deployment(&missing).await.is_err());
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gcommon::BoxFuture;
use serde_json::{Map, Value};

use crate::{DeploymentConfig, DeploymentHandle, PredictionError};

/// One input record sent to a deployment.
pub type PredictionRow = Map<String, Value>;

pub trait PredictionBackend: Send + Sync {
    fn resolve_deployment<'a>(
        &'a self,
        config: &'a DeploymentConfig,
    ) -> BoxFuture<'a, Result<DeploymentHandle, PredictionError>>;

    fn predict<'a>(
        &'a self,
        handle: &'a DeploymentHandle,
        row: PredictionRow,
    ) -> BoxFuture<'a, Result<Vec<Value>, PredictionError>>;
}

type Responder =
    dyn Fn(&DeploymentHandle, &PredictionRow) -> Result<Vec<Value>, PredictionError> + Send + Sync;

/// Answers predictions from a closure and records every row it receives.
///
/// With no registered deployments every id resolves; once one is registered
/// only registered ids resolve.
#[derive(Clone)]
pub struct StaticPredictionBackend {
    responder: Arc<Responder>,
    deployments: HashMap<String, String>,
    rows: Arc<Mutex<Vec<(String, PredictionRow)>>>,
}

impl StaticPredictionBackend {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&DeploymentHandle, &PredictionRow) -> Result<Vec<Value>, PredictionError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            responder: Arc::new(responder),
            deployments: HashMap::new(),
            rows: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_deployment(
        mut self,
        deployment_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.deployments.insert(deployment_id.into(), label.into());
        self
    }

    /// Rows received so far, paired with the deployment id they targeted.
    pub fn recorded_rows(&self) -> Vec<(String, PredictionRow)> {
        match self.rows.lock() {
            Ok(rows) => rows.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl std::fmt::Debug for StaticPredictionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticPredictionBackend")
            .field("deployments", &self.deployments)
            .finish_non_exhaustive()
    }
}

impl PredictionBackend for StaticPredictionBackend {
    fn resolve_deployment<'a>(
        &'a self,
        config: &'a DeploymentConfig,
    ) -> BoxFuture<'a, Result<DeploymentHandle, PredictionError>> {
        Box::pin(async move {
            let handle = DeploymentHandle::new(&config.deployment_id, config.api_token.clone());
            if self.deployments.is_empty() {
                return Ok(handle);
            }

            match self.deployments.get(&config.deployment_id) {
                Some(label) => Ok(handle.with_label(label)),
                None => Err(PredictionError::resolution(format!(
                    "deployment '{}' not found",
                    config.deployment_id
                ))),
            }
        })
    }

    fn predict<'a>(
        &'a self,
        handle: &'a DeploymentHandle,
        row: PredictionRow,
    ) -> BoxFuture<'a, Result<Vec<Value>, PredictionError>> {
        Box::pin(async move {
            let result = (self.responder)(handle, &row);
            match self.rows.lock() {
                Ok(mut rows) => rows.push((handle.deployment_id.clone(), row)),
                Err(poisoned) => poisoned
                    .into_inner()
                    .push((handle.deployment_id.clone(), row)),
            }
            result
        })
    }
}
