use std::sync::Arc;

use serde_json::Value;

use crate::{
    Capability, DeploymentConfig, DeploymentHandle, InferenceHooks, PredictionBackend,
    PredictionError, PredictionRow,
};

/// Connection to one resolved deployment, shared by every capability client.
#[derive(Clone)]
pub(crate) struct DeploymentBinding {
    capability: Capability,
    config: DeploymentConfig,
    handle: DeploymentHandle,
    backend: Arc<dyn PredictionBackend>,
    hooks: Arc<dyn InferenceHooks>,
}

impl DeploymentBinding {
    pub(crate) async fn connect(
        capability: Capability,
        config: DeploymentConfig,
        backend: Arc<dyn PredictionBackend>,
        hooks: Arc<dyn InferenceHooks>,
    ) -> Result<Self, PredictionError> {
        config.validate()?;
        let handle = match backend.resolve_deployment(&config).await {
            Ok(handle) => handle,
            Err(error) => {
                hooks.on_prediction_failure(capability, &config.deployment_id, &error);
                return Err(error);
            }
        };
        hooks.on_deployment_resolved(capability, &handle);

        Ok(Self {
            capability,
            config,
            handle,
            backend,
            hooks,
        })
    }

    pub(crate) async fn predict(&self, row: PredictionRow) -> Result<Vec<Value>, PredictionError> {
        let result = self.backend.predict(&self.handle, row).await;
        if let Err(error) = &result {
            self.hooks
                .on_prediction_failure(self.capability, &self.handle.deployment_id, error);
        }
        result
    }

    pub(crate) fn config(&self) -> &DeploymentConfig {
        &self.config
    }

    pub(crate) fn handle(&self) -> &DeploymentHandle {
        &self.handle
    }

    pub(crate) fn hooks(&self) -> &dyn InferenceHooks {
        self.hooks.as_ref()
    }
}

impl std::fmt::Debug for DeploymentBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentBinding")
            .field("capability", &self.capability)
            .field("deployment_id", &self.handle.deployment_id)
            .field("label", &self.handle.label)
            .finish_non_exhaustive()
    }
}
