//! Single-attempt HTTP executor trait and reqwest-based implementation.

use std::time::Duration;

use gcommon::{BoxFuture, SecretString};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde_json::Value;

use crate::{TransportError, TransportRequest};

/// Performs exactly one network attempt. Retrying is the caller's concern.
pub trait HttpExecutor: Send + Sync + std::fmt::Debug {
    fn send<'a>(
        &'a self,
        url: String,
        request: &'a TransportRequest,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<Value, TransportError>>;
}

#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds one keep-alive client carrying the JSON and identity headers.
    pub fn with_default_headers(
        user_agent: &str,
        bearer_token: Option<&SecretString>,
    ) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|error| TransportError::invalid_request(error.to_string()))?,
        );

        if let Some(token) = bearer_token.filter(|token| !token.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
                .map_err(|error| TransportError::invalid_request(error.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|error| TransportError::invalid_request(error.to_string()))?;

        Ok(Self::new(client))
    }

    async fn parse_error(response: Response) -> TransportError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("request failed with status {status}"));

        TransportError::status(status.as_u16(), message)
    }
}

impl HttpExecutor for ReqwestExecutor {
    fn send<'a>(
        &'a self,
        url: String,
        request: &'a TransportRequest,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<Value, TransportError>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(request.method.into(), url)
                .timeout(timeout);

            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }

            for (name, value) in &request.headers {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|error| TransportError::invalid_request(error.to_string()))?;
                builder = builder.header(name, value.as_str());
            }

            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(TransportError::from)?;
            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let body = response.text().await.map_err(TransportError::from)?;
            parse_body(&body)
        })
    }
}

/// Empty success bodies decode to `null`.
pub(crate) fn parse_body(body: &str) -> Result<Value, TransportError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(body)
        .map_err(|error| TransportError::decode(format!("response is not valid JSON: {error}")))
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    ["detail", "message", "error"]
        .iter()
        .find_map(|key| match value.get(*key)? {
            Value::String(message) => Some(message.clone()),
            Value::Object(inner) => inner
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{extract_error_message, parse_body};
    use crate::TransportErrorKind;

    #[test]
    fn parse_body_treats_blank_as_null() {
        assert_eq!(parse_body("  ").expect("blank body parses"), json!(null));
        assert_eq!(
            parse_body("{\"status\":\"ok\"}").expect("json body parses"),
            json!({ "status": "ok" })
        );
    }

    #[test]
    fn parse_body_rejects_non_json() {
        let error = parse_body("<html>").expect_err("html should fail");
        assert_eq!(error.kind, TransportErrorKind::Decode);
    }

    #[test]
    fn extract_error_message_reads_common_shapes() {
        assert_eq!(
            extract_error_message("{\"detail\":\"not found\"}").as_deref(),
            Some("not found")
        );
        assert_eq!(
            extract_error_message("{\"error\":{\"message\":\"quota\"}}").as_deref(),
            Some("quota")
        );
        assert_eq!(extract_error_message("plain text"), None);
    }
}
