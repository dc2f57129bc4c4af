//! Deployment binding configuration.
//!
//! ```rust
//! use gprovider::DeploymentConfig;
//!
//! let config = DeploymentConfig::new(
//!     "token-123",
//!     "https://app.datarobot.com/api/v2",
//!     "65f0c0ffee",
//!     "assistant-llm",
//! );
//! assert!(config.validate().is_ok());
//!
//! let broken = DeploymentConfig::new("", "https://app.datarobot.com/api/v2", "65f0c0ffee", "x");
//! assert_eq!(broken.validate().expect_err("blank token").field, "api_token");
//! ```

use std::time::Duration;

use gcommon::{ConfigurationError, SecretString, env_parse, env_var};

pub const ENV_API_TOKEN: &str = "DATAROBOT_API_TOKEN";
pub const ENV_ENDPOINT: &str = "DATAROBOT_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "DATAROBOT_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "DATAROBOT_MAX_RETRIES";

#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentConfig {
    pub api_token: SecretString,
    pub endpoint: String,
    pub deployment_id: String,
    pub model_name: String,
    pub max_retries: u32,
    pub timeout: Duration,
}

impl DeploymentConfig {
    pub fn new(
        api_token: impl Into<SecretString>,
        endpoint: impl Into<String>,
        deployment_id: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            api_token: api_token.into(),
            endpoint: endpoint.into(),
            deployment_id: deployment_id.into(),
            model_name: model_name.into(),
            max_retries: 3,
            timeout: Duration::from_secs(300),
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.api_token.is_empty() {
            return Err(ConfigurationError::new("api_token", "api token must not be empty"));
        }

        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigurationError::new("endpoint", "endpoint must not be empty"));
        }

        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigurationError::new(
                "endpoint",
                format!("endpoint '{endpoint}' must be an http(s) URL"),
            ));
        }

        if self.deployment_id.trim().is_empty() {
            return Err(ConfigurationError::new(
                "deployment_id",
                "deployment id must not be empty",
            ));
        }

        if self.max_retries == 0 {
            return Err(ConfigurationError::new(
                "max_retries",
                "at least one attempt is required",
            ));
        }

        Ok(())
    }

    /// Reads `DATAROBOT_{ROLE}_DEPLOYMENT_ID` plus the shared token and endpoint.
    ///
    /// Returns `Ok(None)` when the role has no deployment configured. A configured
    /// deployment without credentials is an error.
    pub fn from_env(role: &str) -> Result<Option<Self>, ConfigurationError> {
        let role = role.trim().to_ascii_uppercase();
        let id_var = format!("DATAROBOT_{role}_DEPLOYMENT_ID");
        let Some(deployment_id) = env_var(&id_var) else {
            return Ok(None);
        };

        let api_token =
            env_var(ENV_API_TOKEN).ok_or_else(|| ConfigurationError::missing(ENV_API_TOKEN))?;
        let endpoint =
            env_var(ENV_ENDPOINT).ok_or_else(|| ConfigurationError::missing(ENV_ENDPOINT))?;
        let model_name = env_var(&format!("DATAROBOT_{role}_MODEL_NAME"))
            .unwrap_or_else(|| deployment_id.clone());

        let mut config = Self::new(api_token, endpoint, deployment_id, model_name);
        if let Some(retries) = env_parse::<u32>(ENV_MAX_RETRIES)? {
            config.max_retries = retries;
        }

        if let Some(seconds) = env_parse::<u64>(ENV_TIMEOUT_SECS)? {
            config.timeout = Duration::from_secs(seconds);
        }

        config.validate()?;
        Ok(Some(config))
    }
}

/// A deployment that the backend has confirmed exists.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentHandle {
    pub deployment_id: String,
    pub label: Option<String>,
    pub api_token: SecretString,
    pub prediction_server: Option<String>,
    pub prediction_key: Option<SecretString>,
}

impl DeploymentHandle {
    pub fn new(deployment_id: impl Into<String>, api_token: SecretString) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            label: None,
            api_token,
            prediction_server: None,
            prediction_key: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
