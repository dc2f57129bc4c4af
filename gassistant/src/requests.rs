//! Request bodies for the assistant service.
//!
//! Extra parameters are flattened into the top level of the JSON body.
//!
//! ```rust
//! use gassistant::ChatRequest;
//! use serde_json::json;
//!
//! let request = ChatRequest::new("hello").with_param("temperature", 0.2);
//! assert_eq!(
//!     serde_json::to_value(&request).expect("serializes"),
//!     json!({ "message": "hello", "context": {}, "temperature": 0.2 })
//! );
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 5;
pub const DEFAULT_ANALYSIS_TYPE: &str = "general";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: Map<String, Value>,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Map::new(),
            params: Map::new(),
        }
    }

    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = context;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRequest {
    pub query: String,
    pub limit: u32,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl RecommendationRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_RECOMMENDATION_LIMIT,
            params: Map::new(),
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    pub document_text: String,
    pub analysis_type: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl AnalysisRequest {
    pub fn new(document_text: impl Into<String>) -> Self {
        Self {
            document_text: document_text.into(),
            analysis_type: DEFAULT_ANALYSIS_TYPE.to_string(),
            params: Map::new(),
        }
    }

    pub fn with_analysis_type(mut self, analysis_type: impl Into<String>) -> Self {
        self.analysis_type = analysis_type.into();
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn recommendation_request_defaults_to_five_results() {
        let body = serde_json::to_value(RecommendationRequest::new("laptops"))
            .expect("request serializes");
        assert_eq!(body, json!({ "query": "laptops", "limit": 5 }));
    }

    #[test]
    fn analysis_request_defaults_to_general_and_flattens_params() {
        let body = serde_json::to_value(
            AnalysisRequest::new("Quarterly report")
                .with_analysis_type("summary")
                .with_param("language", "en"),
        )
        .expect("request serializes");

        assert_eq!(
            body,
            json!({
                "document_text": "Quarterly report",
                "analysis_type": "summary",
                "language": "en"
            })
        );
        assert_eq!(AnalysisRequest::new("x").analysis_type, "general");
    }

    #[test]
    fn chat_request_carries_context() {
        let mut context = Map::new();
        context.insert("topic".to_string(), json!("billing"));
        let body = serde_json::to_value(ChatRequest::new("why?").with_context(context))
            .expect("request serializes");

        assert_eq!(body["context"], json!({ "topic": "billing" }));
    }
}
