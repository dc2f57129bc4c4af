//! Small convenience constructors for common types.

use gbridge::Document;

use crate::{ConversationTurn, Message, Role, SessionId};

pub fn system_message(content: impl Into<String>) -> Message {
    Message::new(Role::System, content)
}

pub fn user_message(content: impl Into<String>) -> Message {
    Message::new(Role::User, content)
}

pub fn assistant_message(content: impl Into<String>) -> Message {
    Message::new(Role::Assistant, content)
}

pub fn session(id: impl Into<SessionId>) -> SessionId {
    id.into()
}

/// Records a gateway message as a stored conversation turn.
pub fn turn_from_message(message: &Message) -> ConversationTurn {
    let role = match message.role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    ConversationTurn::new(role, message.content.clone())
}

/// Wraps plain texts as documents for the reranking compressor.
pub fn documents<I, S>(texts: I) -> Vec<Document>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    texts.into_iter().map(Document::new).collect()
}
