//! Storage-agnostic conversation store.
//!
//! ```rust
//! use gmemory::{ConversationStore, ConversationTurn, StoreKind};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = ConversationStore::from_kind(StoreKind::None).expect("in-memory store");
//! store
//!     .append_turn(&"s1".into(), Some("u1"), ConversationTurn::user("hi"))
//!     .await
//!     .expect("append succeeds");
//!
//! let record = store.fetch(&"s1".into()).await.expect("fetch succeeds").expect("present");
//! assert_eq!(record.history[0].content, "hi");
//! assert_eq!(record.user_id.as_deref(), Some("u1"));
//! # }
//! ```

use std::sync::Arc;
use std::time::SystemTime;

use gcommon::SessionId;

use crate::{
    ConversationTurn, MemoryError, SessionBackend, SessionBackendConfig, SessionRecord, StoreKind,
    create_session_backend,
};

#[derive(Clone)]
pub struct ConversationStore {
    kind: StoreKind,
    backend: Arc<dyn SessionBackend>,
}

impl ConversationStore {
    pub fn new(kind: StoreKind, backend: Arc<dyn SessionBackend>) -> Self {
        Self { kind, backend }
    }

    pub fn from_config(config: SessionBackendConfig) -> Result<Self, MemoryError> {
        let kind = config.kind();
        Ok(Self::new(kind, create_session_backend(config)?))
    }

    pub fn from_kind(kind: StoreKind) -> Result<Self, MemoryError> {
        Self::from_config(SessionBackendConfig::from_kind(kind)?)
    }

    /// Backend named by `APP_DATABASE_NAME`.
    pub fn from_env() -> Result<Self, MemoryError> {
        Self::from_kind(StoreKind::from_env()?)
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub async fn store(
        &self,
        session_id: &SessionId,
        user_id: Option<&str>,
        history: Vec<ConversationTurn>,
        last_activity: SystemTime,
        start_time: SystemTime,
    ) -> Result<(), MemoryError> {
        if session_id.as_str().trim().is_empty() {
            return Err(MemoryError::invalid_request("session id must not be empty"));
        }

        self.backend
            .store(SessionRecord {
                session_id: session_id.clone(),
                user_id: user_id.map(str::to_string),
                history,
                start_time,
                last_activity,
            })
            .await
    }

    pub async fn fetch(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionRecord>, MemoryError> {
        self.backend.fetch(session_id).await
    }

    pub async fn delete(&self, session_id: &SessionId) -> Result<(), MemoryError> {
        self.backend.delete(session_id).await
    }

    pub async fn exists(&self, session_id: &SessionId) -> Result<bool, MemoryError> {
        self.backend.exists(session_id).await
    }

    /// Creates the session on its first turn. Read-modify-write, so concurrent
    /// appends to one session can lose turns.
    pub async fn append_turn(
        &self,
        session_id: &SessionId,
        user_id: Option<&str>,
        turn: ConversationTurn,
    ) -> Result<SessionRecord, MemoryError> {
        if session_id.as_str().trim().is_empty() {
            return Err(MemoryError::invalid_request("session id must not be empty"));
        }

        let mut record = match self.backend.fetch(session_id).await? {
            Some(record) => record,
            None => SessionRecord {
                session_id: session_id.clone(),
                user_id: None,
                history: Vec::new(),
                start_time: turn.timestamp,
                last_activity: turn.timestamp,
            },
        };

        if record.user_id.is_none() {
            record.user_id = user_id.map(str::to_string);
        }
        record.push_turn(turn);

        self.backend.store(record.clone()).await?;
        Ok(record)
    }
}

impl std::fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStore")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
