//! Observability hooks for transport retries, inference calls, and bridge fallbacks.
//!
//! ```rust
//! use gobserve::{MetricsObservabilityHooks, SafeTransportHooks, TracingObservabilityHooks};
//!
//! let _transport_hooks = SafeTransportHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeBridgeHooks, SafeInferenceHooks, SafeTransportHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeBridgeHooks, SafeInferenceHooks, SafeTransportHooks,
        TracingObservabilityHooks,
    };
}

#[cfg(test)]
mod tests;
