//! Framework-shaped message, generation, and document types.

use std::pin::Pin;

use futures_core::Stream;
use gprovider::{Message, Role};
use serde_json::{Map, Value};

use crate::BridgeError;

#[derive(Debug, Clone, PartialEq)]
pub enum BaseMessage {
    System(String),
    Human(String),
    Ai(String),
    Tool { tool_call_id: String, content: Value },
    Generic { role: String, content: Value },
}

impl BaseMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::Human(content.into())
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::Ai(content.into())
    }

    /// Text of the message; structured content is rendered as JSON.
    pub fn text(&self) -> String {
        match self {
            Self::System(text) | Self::Human(text) | Self::Ai(text) => text.clone(),
            Self::Tool { content, .. } | Self::Generic { content, .. } => match content {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            },
        }
    }

    /// Maps onto the adapter's three roles. Tool and generic messages become user turns.
    pub fn to_message(&self) -> Message {
        let role = match self {
            Self::System(_) => Role::System,
            Self::Ai(_) => Role::Assistant,
            Self::Human(_) | Self::Tool { .. } | Self::Generic { .. } => Role::User,
        };

        Message::new(role, self.text())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatGeneration {
    pub message: BaseMessage,
}

impl ChatGeneration {
    pub fn text(&self) -> String {
        self.message.text()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatResult {
    pub generations: Vec<ChatGeneration>,
}

impl ChatResult {
    pub fn single(message: BaseMessage) -> Self {
        Self {
            generations: vec![ChatGeneration { message }],
        }
    }

    pub fn text(&self) -> Option<String> {
        self.generations.first().map(ChatGeneration::text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatGenerationChunk {
    pub message: BaseMessage,
}

pub type ChatGenerationStream<'a> =
    Pin<Box<dyn Stream<Item = Result<ChatGenerationChunk, BridgeError>> + Send + 'a>>;

pub type DocumentMetadata = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub page_content: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: DocumentMetadata::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn non_chat_messages_become_user_turns_with_stringified_content() {
        let tool = BaseMessage::Tool {
            tool_call_id: "call_1".to_string(),
            content: json!({ "temperature": 21 }),
        };
        let message = tool.to_message();
        assert_eq!(message.role, Role::User);
        assert_eq!(message.content, "{\"temperature\":21}");

        let generic = BaseMessage::Generic {
            role: "function".to_string(),
            content: json!("plain"),
        };
        assert_eq!(generic.to_message(), Message::user("plain"));
    }

    #[test]
    fn chat_roles_map_directly() {
        assert_eq!(BaseMessage::system("s").to_message().role, Role::System);
        assert_eq!(BaseMessage::human("h").to_message().role, Role::User);
        assert_eq!(BaseMessage::ai("a").to_message().role, Role::Assistant);
    }

    #[test]
    fn document_metadata_builder_accepts_json_values() {
        let document = Document::new("body")
            .with_metadata("source", "wiki")
            .with_metadata("page", 3);
        assert_eq!(document.metadata.get("source"), Some(&json!("wiki")));
        assert_eq!(document.metadata.get("page"), Some(&json!(3)));
    }
}
