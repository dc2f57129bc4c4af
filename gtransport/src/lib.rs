//! Retry-aware HTTP transport shared by the assistant client and inference adapters.
//!
//! ```rust
//! use gtransport::{RetryPolicy, TransportError, TransportErrorKind};
//!
//! let policy = RetryPolicy::new(3);
//! assert!(policy.should_retry(2));
//! assert!(!policy.should_retry(3));
//!
//! let error = TransportError::timeout("slow upstream");
//! assert_eq!(error.kind, TransportErrorKind::Timeout);
//! ```

mod error;
mod executor;
mod request;
mod resilience;
mod transport;

pub mod prelude {
    pub use crate::{
        HttpExecutor, Method, NoopTransportHooks, ResilientTransport, RetryPolicy,
        TransportConfig, TransportError, TransportErrorKind, TransportHooks, TransportRequest,
        execute_with_retry,
    };
}

pub use error::{TransportError, TransportErrorKind};
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use request::{Method, TransportRequest};
pub use resilience::{NoopTransportHooks, RetryPolicy, TransportHooks, execute_with_retry};
pub use transport::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, ResilientTransport, TransportConfig};
