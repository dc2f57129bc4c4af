//! Assistant client configuration.
//!
//! ```rust
//! use std::time::Duration;
//! use gassistant::AssistantConfig;
//!
//! let config = AssistantConfig::default();
//! assert_eq!(config.base_url, "http://localhost:8000");
//! assert_eq!(config.timeout, Duration::from_secs(30));
//! assert_eq!(config.retry_attempts, 3);
//!
//! let transport = config.with_retry_attempts(0).transport_config();
//! assert_eq!(transport.retry.max_attempts, 1);
//! ```

use std::time::Duration;

use gcommon::{ConfigurationError, env_parse, env_var};
use gtransport::{DEFAULT_BASE_URL, RetryPolicy, TransportConfig};

pub const ENV_URL: &str = "ASSISTANT_URL";
pub const ENV_TIMEOUT_SECS: &str = "ASSISTANT_TIMEOUT_SECS";
pub const ENV_RETRY_ATTEMPTS: &str = "ASSISTANT_RETRY_ATTEMPTS";
pub const ENV_RETRY_DELAY_MS: &str = "ASSISTANT_RETRY_DELAY_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry_attempts: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl AssistantConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_attempts(mut self, retry_attempts: u32) -> Self {
        self.retry_attempts = retry_attempts;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Defaults overridden by `ASSISTANT_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let mut config = Self::default();
        if let Some(url) = env_var(ENV_URL) {
            config.base_url = url;
        }

        if let Some(seconds) = env_parse::<u64>(ENV_TIMEOUT_SECS)? {
            config.timeout = Duration::from_secs(seconds);
        }

        if let Some(attempts) = env_parse::<u32>(ENV_RETRY_ATTEMPTS)? {
            config.retry_attempts = attempts;
        }

        if let Some(millis) = env_parse::<u64>(ENV_RETRY_DELAY_MS)? {
            config.retry_delay = Duration::from_millis(millis);
        }

        Ok(config)
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::new(self.base_url.clone())
            .with_timeout(self.timeout)
            .with_retry(RetryPolicy::fixed(self.retry_attempts, self.retry_delay))
    }
}
