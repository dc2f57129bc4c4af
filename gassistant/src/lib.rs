//! Client for the virtual assistant service.
//!
//! ```rust
//! use gassistant::{AssistantConfig, ChatRequest, RecommendationRequest};
//!
//! let config = AssistantConfig::default();
//! assert_eq!(config.retry_attempts, 3);
//!
//! let request = ChatRequest::new("What can you do?").with_param("model", "default");
//! assert_eq!(request.params["model"], "default");
//! assert_eq!(RecommendationRequest::new("books").limit, 5);
//! ```

mod client;
mod config;
mod requests;

pub mod prelude {
    pub use crate::{
        AnalysisRequest, AssistantClient, AssistantConfig, ChatRequest, RecommendationRequest,
        response_text,
    };
    pub use gtransport::{TransportError, TransportErrorKind};
}

pub use client::{AssistantClient, DEFAULT_HISTORY_LIMIT, NO_RESPONSE, response_text};
pub use config::{
    AssistantConfig, ENV_RETRY_ATTEMPTS, ENV_RETRY_DELAY_MS, ENV_TIMEOUT_SECS, ENV_URL,
};
pub use requests::{
    AnalysisRequest, ChatRequest, DEFAULT_ANALYSIS_TYPE, DEFAULT_RECOMMENDATION_LIMIT,
    RecommendationRequest,
};
