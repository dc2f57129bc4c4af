//! Conversation session records.

use std::time::SystemTime;

use gcommon::SessionId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: String,
    pub content: String,
    pub timestamp: SystemTime,
}

impl ConversationTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            timestamp: SystemTime::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    pub fn at(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub user_id: Option<String>,
    pub history: Vec<ConversationTurn>,
    pub start_time: SystemTime,
    pub last_activity: SystemTime,
}

impl SessionRecord {
    /// An empty session started now.
    pub fn new(session_id: impl Into<SessionId>) -> Self {
        let now = SystemTime::now();
        Self {
            session_id: session_id.into(),
            user_id: None,
            history: Vec::new(),
            start_time: now,
            last_activity: now,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Appends a turn and moves the activity clock forward to it.
    pub fn push_turn(&mut self, turn: ConversationTurn) {
        if turn.timestamp > self.last_activity {
            self.last_activity = turn.timestamp;
        }
        self.history.push(turn);
    }
}
