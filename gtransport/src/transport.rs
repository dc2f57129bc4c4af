//! Retrying request executor shared by every outbound call.

use std::sync::Arc;
use std::time::Duration;

use gcommon::SecretString;
use serde_json::Value;

use crate::{
    HttpExecutor, NoopTransportHooks, ReqwestExecutor, RetryPolicy, TransportError,
    TransportHooks, TransportRequest, execute_with_retry,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_USER_AGENT: &str = concat!("gantry-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub struct TransportConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub user_agent: String,
    pub bearer_token: Option<SecretString>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            bearer_token: None,
        }
    }
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_bearer_token(mut self, token: SecretString) -> Self {
        self.bearer_token = Some(token);
        self
    }
}

/// Executes requests with a per-attempt timeout and the configured retry budget.
///
/// ```rust
/// use std::time::Duration;
/// use gtransport::{ResilientTransport, RetryPolicy, TransportConfig};
///
/// let config = TransportConfig::new("http://localhost:8000")
///     .with_timeout(Duration::from_secs(5))
///     .with_retry(RetryPolicy::fixed(2, Duration::from_millis(250)));
/// let transport = ResilientTransport::new(config).expect("client should build");
///
/// assert_eq!(transport.url_for("/health"), "http://localhost:8000/health");
/// assert_eq!(
///     transport.url_for("https://predict.local/predApi"),
///     "https://predict.local/predApi"
/// );
/// assert_eq!(transport.config().retry.max_attempts, 2);
/// ```
#[derive(Clone)]
pub struct ResilientTransport {
    config: TransportConfig,
    executor: Arc<dyn HttpExecutor>,
    hooks: Arc<dyn TransportHooks>,
}

impl ResilientTransport {
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let executor = ReqwestExecutor::with_default_headers(
            &config.user_agent,
            config.bearer_token.as_ref(),
        )?;
        Ok(Self::with_executor(config, Arc::new(executor)))
    }

    pub fn with_executor(config: TransportConfig, executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            config,
            executor,
            hooks: Arc::new(NoopTransportHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn TransportHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }

        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    pub async fn execute(&self, request: TransportRequest) -> Result<Value, TransportError> {
        let url = self.url_for(&request.endpoint);
        let operation = request.operation_name();
        let timeout = self.config.timeout;
        let request = &request;

        execute_with_retry(
            &operation,
            &self.config.retry,
            self.hooks.as_ref(),
            |_attempt| {
                let url = url.clone();
                async move {
                    match tokio::time::timeout(timeout, self.executor.send(url, request, timeout))
                        .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(TransportError::timeout(format!(
                            "attempt timed out after {}ms",
                            timeout.as_millis()
                        ))),
                    }
                }
            },
            tokio::time::sleep,
        )
        .await
    }

    pub async fn get(&self, endpoint: &str) -> Result<Value, TransportError> {
        self.execute(TransportRequest::get(endpoint)).await
    }

    pub async fn post(&self, endpoint: &str, body: Value) -> Result<Value, TransportError> {
        self.execute(TransportRequest::post(endpoint, body)).await
    }
}

impl std::fmt::Debug for ResilientTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientTransport")
            .field("config", &self.config)
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}
