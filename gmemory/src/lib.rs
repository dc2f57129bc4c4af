//! Conversation session persistence behind a storage-agnostic store.
//!
//! The backend is chosen once from a closed set of kinds: `postgres` or
//! `none` (in-memory, non-durable).

mod backend;
mod backends {
    pub mod postgres;
}
mod error;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        ConversationStore, ConversationTurn, InMemorySessionBackend, MemoryError, MemoryErrorKind,
        PostgresSessionBackend, PostgresSessionConfig, SessionBackend, SessionBackendConfig,
        SessionRecord, StoreKind, create_session_backend,
    };
}

pub use backend::{
    ENV_STORE_KIND, InMemorySessionBackend, PostgresSessionBackend, PostgresSessionConfig,
    SessionBackend, SessionBackendConfig, StoreKind, create_session_backend,
};
pub use error::{MemoryError, MemoryErrorKind};
pub use store::ConversationStore;
pub use types::{ConversationTurn, SessionRecord};
