//! Environment-driven gateway configuration.
//!
//! ```rust
//! use gantry::{GatewayConfig, StoreKind};
//!
//! let config = GatewayConfig::default();
//! assert!(config.deployments.is_empty());
//! assert_eq!(config.store, StoreKind::None);
//! assert_eq!(config.assistant.base_url, "http://localhost:8000");
//! ```

use std::sync::Once;

use gassistant::AssistantConfig;
use gmemory::StoreKind;
use gprovider::GatewayDeployments;

use crate::GatewayError;

static ENV_LOADER: Once = Once::new();

/// Loads `.env` from the working directory once per process. A missing file is fine.
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = dotenvy::dotenv();
    });
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatewayConfig {
    pub deployments: GatewayDeployments,
    pub assistant: AssistantConfig,
    pub store: StoreKind,
}

impl GatewayConfig {
    pub fn with_deployments(mut self, deployments: GatewayDeployments) -> Self {
        self.deployments = deployments;
        self
    }

    pub fn with_assistant(mut self, assistant: AssistantConfig) -> Self {
        self.assistant = assistant;
        self
    }

    pub fn with_store(mut self, store: StoreKind) -> Self {
        self.store = store;
        self
    }

    /// Reads the process environment as-is.
    pub fn from_env() -> Result<Self, GatewayError> {
        Ok(Self {
            deployments: GatewayDeployments::from_env()?,
            assistant: AssistantConfig::from_env()?,
            store: StoreKind::from_env()?,
        })
    }

    /// Like [`GatewayConfig::from_env`], after merging a `.env` file into the environment.
    pub fn load() -> Result<Self, GatewayError> {
        ensure_env_loaded();
        Self::from_env()
    }
}
