//! Capability-tagged request, response, and message model types.
//!
//! ```rust
//! use gprovider::{Capability, Message, ModelRequest, Role};
//!
//! let request = ModelRequest::chat(vec![Message::new(Role::User, "2+2?")]);
//! assert_eq!(request.capability(), Capability::Chat);
//!
//! let rerank = ModelRequest::rerank("rust", vec!["a".into(), "b".into()]).with_top_k(1);
//! assert_eq!(rerank.capability(), Capability::Rerank);
//! assert_eq!(Role::from_name("moderator"), Role::User);
//! ```

use std::fmt::{Display, Formatter};

use gcommon::GenerationOptions;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Chat,
    Embed,
    Rerank,
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Chat => "chat",
            Self::Embed => "embed",
            Self::Rerank => "rerank",
        };

        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Unrecognized roles fall back to `User`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "system" => Self::System,
            "assistant" | "ai" => Self::Assistant,
            _ => Self::User,
        }
    }

    pub fn prompt_prefix(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Builds a message from loosely typed parts, stringifying non-text content.
    pub fn from_parts(role: &str, content: &Value) -> Self {
        let content = match content {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };

        Self::new(Role::from_name(role), content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedDocument {
    pub document: String,
    pub score: f64,
    /// Position of the document in the caller's input list.
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelRequest {
    Chat {
        messages: Vec<Message>,
        options: GenerationOptions,
    },
    Embed {
        texts: Vec<String>,
    },
    Rerank {
        query: String,
        documents: Vec<String>,
        top_k: Option<usize>,
    },
}

impl ModelRequest {
    pub fn chat(messages: Vec<Message>) -> Self {
        Self::Chat {
            messages,
            options: GenerationOptions::default(),
        }
    }

    pub fn embed(texts: Vec<String>) -> Self {
        Self::Embed { texts }
    }

    pub fn rerank(query: impl Into<String>, documents: Vec<String>) -> Self {
        Self::Rerank {
            query: query.into(),
            documents,
            top_k: None,
        }
    }

    pub fn with_options(mut self, value: GenerationOptions) -> Self {
        if let Self::Chat { options, .. } = &mut self {
            *options = value;
        }
        self
    }

    pub fn with_top_k(mut self, value: usize) -> Self {
        if let Self::Rerank { top_k, .. } = &mut self {
            *top_k = Some(value);
        }
        self
    }

    pub fn capability(&self) -> Capability {
        match self {
            Self::Chat { .. } => Capability::Chat,
            Self::Embed { .. } => Capability::Embed,
            Self::Rerank { .. } => Capability::Rerank,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelResponse {
    Chat(String),
    Embed(Vec<Vec<f32>>),
    Rerank(Vec<RankedDocument>),
}

impl ModelResponse {
    pub fn capability(&self) -> Capability {
        match self {
            Self::Chat(_) => Capability::Chat,
            Self::Embed(_) => Capability::Embed,
            Self::Rerank(_) => Capability::Rerank,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Chat(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_vectors(self) -> Option<Vec<Vec<f32>>> {
        match self {
            Self::Embed(vectors) => Some(vectors),
            _ => None,
        }
    }

    pub fn into_ranked(self) -> Option<Vec<RankedDocument>> {
        match self {
            Self::Rerank(ranked) => Some(ranked),
            _ => None,
        }
    }
}
