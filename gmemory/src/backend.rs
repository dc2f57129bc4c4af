//! Session backend trait, backend selection, and the in-memory backend.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use gcommon::{BoxFuture, SessionId, env_var};

use crate::error::MemoryError;
use crate::types::SessionRecord;

pub use crate::backends::postgres::{PostgresSessionBackend, PostgresSessionConfig};

pub const ENV_STORE_KIND: &str = "APP_DATABASE_NAME";

pub trait SessionBackend: Send + Sync {
    /// Inserts or fully replaces the record for its session id.
    fn store<'a>(&'a self, record: SessionRecord) -> BoxFuture<'a, Result<(), MemoryError>>;

    fn fetch<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> BoxFuture<'a, Result<Option<SessionRecord>, MemoryError>>;

    /// Deleting an unknown session is not an error.
    fn delete<'a>(&'a self, session_id: &'a SessionId) -> BoxFuture<'a, Result<(), MemoryError>>;

    fn exists<'a>(&'a self, session_id: &'a SessionId) -> BoxFuture<'a, Result<bool, MemoryError>>;
}

/// The closed set of supported stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StoreKind {
    Postgres,
    #[default]
    None,
}

impl StoreKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::None => "none",
        }
    }

    /// Reads `APP_DATABASE_NAME`, defaulting to `none` when unset.
    pub fn from_env() -> Result<Self, MemoryError> {
        env_var(ENV_STORE_KIND).map_or(Ok(Self::None), |name| name.parse())
    }
}

impl FromStr for StoreKind {
    type Err = MemoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "none" => Ok(Self::None),
            other => Err(MemoryError::configuration(format!(
                "{other} database is not supported. Supported types: postgres, none"
            ))),
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackendConfig {
    Postgres(PostgresSessionConfig),
    InMemory,
}

impl SessionBackendConfig {
    /// Postgres settings come from the `POSTGRES_*` variables.
    pub fn from_kind(kind: StoreKind) -> Result<Self, MemoryError> {
        match kind {
            StoreKind::Postgres => Ok(Self::Postgres(PostgresSessionConfig::from_env()?)),
            StoreKind::None => Ok(Self::InMemory),
        }
    }

    pub fn kind(&self) -> StoreKind {
        match self {
            Self::Postgres(_) => StoreKind::Postgres,
            Self::InMemory => StoreKind::None,
        }
    }
}

pub fn create_session_backend(
    config: SessionBackendConfig,
) -> Result<Arc<dyn SessionBackend>, MemoryError> {
    match config {
        SessionBackendConfig::Postgres(config) => {
            Ok(Arc::new(PostgresSessionBackend::new(config)?))
        }
        SessionBackendConfig::InMemory => Ok(Arc::new(InMemorySessionBackend::new())),
    }
}

/// Non-durable backend for tests and local runs; contents vanish with the process.
///
/// The mutex only makes the map shareable; callers are expected to issue one
/// operation at a time.
#[derive(Debug, Default)]
pub struct InMemorySessionBackend {
    sessions: Mutex<HashMap<SessionId, SessionRecord>>,
}

impl InMemorySessionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_sessions<T>(
        &self,
        f: impl FnOnce(&mut HashMap<SessionId, SessionRecord>) -> T,
    ) -> Result<T, MemoryError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| MemoryError::storage("memory backend lock poisoned"))?;
        Ok(f(&mut sessions))
    }
}

impl SessionBackend for InMemorySessionBackend {
    fn store<'a>(&'a self, record: SessionRecord) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            self.with_sessions(|sessions| {
                sessions.insert(record.session_id.clone(), record);
            })
        })
    }

    fn fetch<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> BoxFuture<'a, Result<Option<SessionRecord>, MemoryError>> {
        Box::pin(async move { self.with_sessions(|sessions| sessions.get(session_id).cloned()) })
    }

    fn delete<'a>(&'a self, session_id: &'a SessionId) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            self.with_sessions(|sessions| {
                sessions.remove(session_id);
            })
        })
    }

    fn exists<'a>(&'a self, session_id: &'a SessionId) -> BoxFuture<'a, Result<bool, MemoryError>> {
        Box::pin(async move { self.with_sessions(|sessions| sessions.contains_key(session_id)) })
    }
}
