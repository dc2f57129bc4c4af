//! Prediction backend speaking the managed inference provider's REST API.
//!
//! ```rust
//! use gprovider::{DeploymentConfig, HttpPredictionBackend};
//!
//! let config = DeploymentConfig::new("token", "https://app.datarobot.com/api/v2", "65f0", "llm");
//! let backend = HttpPredictionBackend::from_config(&config).expect("valid config builds");
//! assert_eq!(backend.transport().config().base_url, "https://app.datarobot.com/api/v2");
//!
//! let broken = DeploymentConfig::new("token", "ftp://nowhere", "65f0", "llm");
//! assert!(HttpPredictionBackend::from_config(&broken).is_err());
//! ```

use std::sync::Arc;

use gcommon::BoxFuture;
use gtransport::{
    ResilientTransport, RetryPolicy, TransportConfig, TransportError, TransportHooks,
    TransportRequest,
};
use serde_json::Value;

use crate::{DeploymentConfig, DeploymentHandle, PredictionBackend, PredictionError, PredictionRow};

const PREDICTION_KEY_HEADER: &str = "DataRobot-Key";

#[derive(Debug, Clone)]
pub struct HttpPredictionBackend {
    transport: ResilientTransport,
}

impl HttpPredictionBackend {
    pub fn new(transport: ResilientTransport) -> Self {
        Self { transport }
    }

    /// Builds a transport bounded by the deployment's timeout and retry budget.
    pub fn from_config(config: &DeploymentConfig) -> Result<Self, PredictionError> {
        config.validate()?;
        let transport = ResilientTransport::new(
            TransportConfig::new(config.endpoint.trim_end_matches('/'))
                .with_timeout(config.timeout)
                .with_retry(RetryPolicy::new(config.max_retries)),
        )?;

        Ok(Self::new(transport))
    }

    pub fn with_transport_hooks(mut self, hooks: Arc<dyn TransportHooks>) -> Self {
        self.transport = self.transport.with_hooks(hooks);
        self
    }

    pub fn transport(&self) -> &ResilientTransport {
        &self.transport
    }
}

impl PredictionBackend for HttpPredictionBackend {
    fn resolve_deployment<'a>(
        &'a self,
        config: &'a DeploymentConfig,
    ) -> BoxFuture<'a, Result<DeploymentHandle, PredictionError>> {
        Box::pin(async move {
            config.validate()?;
            let url = format!(
                "{}/deployments/{}/",
                config.endpoint.trim().trim_end_matches('/'),
                config.deployment_id
            );
            let request = TransportRequest::get(url)
                .with_header("Authorization", format!("Bearer {}", config.api_token.expose()));

            let body = self
                .transport
                .execute(request)
                .await
                .map_err(|error| resolution_error(&config.deployment_id, error))?;

            handle_from_body(config, &body)
        })
    }

    fn predict<'a>(
        &'a self,
        handle: &'a DeploymentHandle,
        row: PredictionRow,
    ) -> BoxFuture<'a, Result<Vec<Value>, PredictionError>> {
        Box::pin(async move {
            let Some(server) = handle.prediction_server.as_deref() else {
                return Err(PredictionError::resolution(format!(
                    "deployment '{}' has no prediction server",
                    handle.deployment_id
                )));
            };

            let url = format!(
                "{}/predApi/v1.0/deployments/{}/predictions",
                server.trim_end_matches('/'),
                handle.deployment_id
            );
            let mut request =
                TransportRequest::post(url, Value::Array(vec![Value::Object(row)]))
                    .with_header("Authorization", format!("Bearer {}", handle.api_token.expose()));
            if let Some(key) = handle.prediction_key.as_ref() {
                request = request.with_header(PREDICTION_KEY_HEADER, key.expose());
            }

            let body = self.transport.execute(request).await?;
            extract_predictions(&body)
        })
    }
}

fn resolution_error(deployment_id: &str, error: TransportError) -> PredictionError {
    match error.status {
        Some(status) if (400..500).contains(&status) => PredictionError::resolution(format!(
            "deployment '{deployment_id}' could not be resolved: {error}"
        )),
        _ => PredictionError::from(error),
    }
}

fn handle_from_body(
    config: &DeploymentConfig,
    body: &Value,
) -> Result<DeploymentHandle, PredictionError> {
    let server = body.get("defaultPredictionServer");
    let Some(url) = server
        .and_then(|server| server.get("url"))
        .and_then(Value::as_str)
        .filter(|url| !url.trim().is_empty())
    else {
        return Err(PredictionError::resolution(format!(
            "deployment '{}' has no prediction server",
            config.deployment_id
        )));
    };

    let mut handle = DeploymentHandle::new(&config.deployment_id, config.api_token.clone());
    if let Some(label) = body.get("label").and_then(Value::as_str) {
        handle = handle.with_label(label);
    }
    handle.prediction_server = Some(url.to_string());
    handle.prediction_key = server
        .and_then(|server| server.get("datarobot-key"))
        .and_then(Value::as_str)
        .map(Into::into);

    Ok(handle)
}

pub(crate) fn extract_predictions(body: &Value) -> Result<Vec<Value>, PredictionError> {
    let Some(rows) = body.get("data").and_then(Value::as_array) else {
        return Err(PredictionError::decode("prediction response has no 'data' array"));
    };

    Ok(rows
        .iter()
        .map(|row| row.get("prediction").cloned().unwrap_or(Value::Null))
        .collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn handle_from_body_reads_label_and_prediction_server() {
        let config = DeploymentConfig::new("token", "https://dr.local/api/v2", "abc", "llm");
        let handle = handle_from_body(
            &config,
            &json!({
                "label": "Assistant LLM",
                "defaultPredictionServer": {
                    "url": "https://predict.dr.local",
                    "datarobot-key": "key-1"
                }
            }),
        )
        .expect("deployment with a prediction server resolves");

        assert_eq!(handle.deployment_id, "abc");
        assert_eq!(handle.label.as_deref(), Some("Assistant LLM"));
        assert_eq!(handle.prediction_server.as_deref(), Some("https://predict.dr.local"));
        assert_eq!(
            handle.prediction_key.as_ref().map(|key| key.expose()),
            Some("key-1")
        );
    }

    #[test]
    fn handle_from_body_requires_a_prediction_server() {
        let config = DeploymentConfig::new("token", "https://dr.local/api/v2", "abc", "llm");

        for body in [
            json!({ "label": "bare" }),
            json!({ "label": "bare", "defaultPredictionServer": { "datarobot-key": "k" } }),
            json!({ "defaultPredictionServer": { "url": "  " } }),
        ] {
            let error = handle_from_body(&config, &body).expect_err("no server must fail");
            assert_eq!(error.kind, crate::PredictionErrorKind::Resolution);
        }
    }

    #[test]
    fn extract_predictions_keeps_row_order_and_missing_values() {
        let body = json!({ "data": [
            { "prediction": "first" },
            { "rowId": 1 },
            { "prediction": [0.1, 0.2] }
        ]});

        assert_eq!(
            extract_predictions(&body).expect("data array parses"),
            vec![json!("first"), json!(null), json!([0.1, 0.2])]
        );
        assert!(extract_predictions(&json!({ "rows": [] })).is_err());
    }

    #[test]
    fn client_errors_during_resolution_are_resolution_failures() {
        let not_found = resolution_error("abc", TransportError::status(404, "not found"));
        assert_eq!(not_found.kind, crate::PredictionErrorKind::Resolution);

        let outage = resolution_error("abc", TransportError::status(503, "unavailable"));
        assert_eq!(outage.kind, crate::PredictionErrorKind::Transport);
    }
}
