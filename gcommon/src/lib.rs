//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use gcommon::{GenerationOptions, MetadataMap, SecretString, SessionId};
//!
//! let session = SessionId::from("session-1");
//! let token = SecretString::new("token-123");
//! let mut metadata = MetadataMap::new();
//! metadata.insert("tenant".to_string(), "acme".to_string());
//!
//! let options = GenerationOptions::default().with_temperature(0.3).with_max_tokens(64);
//! assert_eq!(session.as_str(), "session-1");
//! assert_eq!(format!("{token:?}"), "[REDACTED]");
//! assert_eq!(options.max_tokens, Some(64));
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use gcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Shared metadata map and the session identifier newtype.
    //!
    //! ```rust
    //! use gcommon::SessionId;
    //!
    //! let session = SessionId::new("session-42");
    //! assert_eq!(session.to_string(), "session-42");
    //! ```

    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};

    pub type MetadataMap = HashMap<String, String>;

    /// Opaque conversation identifier. Clients only round-trip it.
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod secret {
    //! Redacting wrapper for API tokens and passwords.

    #[derive(Clone, PartialEq, Eq)]
    pub struct SecretString {
        value: String,
    }

    impl SecretString {
        pub fn new(value: impl Into<String>) -> Self {
            Self {
                value: value.into(),
            }
        }

        pub fn expose(&self) -> &str {
            self.value.as_str()
        }

        pub fn is_empty(&self) -> bool {
            self.value.trim().is_empty()
        }
    }

    impl std::fmt::Debug for SecretString {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("[REDACTED]")
        }
    }

    impl From<String> for SecretString {
        fn from(value: String) -> Self {
            Self::new(value)
        }
    }

    impl From<&str> for SecretString {
        fn from(value: &str) -> Self {
            Self::new(value)
        }
    }

    impl Drop for SecretString {
        fn drop(&mut self) {
            // SAFETY: zero bytes are valid UTF-8, so the string stays well formed.
            unsafe {
                self.value.as_mut_vec().fill(0);
            }
        }
    }
}

pub mod model {
    //! Generation settings forwarded to chat predictions.
    //!
    //! ```rust
    //! use gcommon::GenerationOptions;
    //!
    //! let options = GenerationOptions::default()
    //!     .with_temperature(0.2)
    //!     .with_max_tokens(128);
    //!
    //! assert_eq!(options.temperature, Some(0.2));
    //! assert!(!options.is_empty());
    //! assert!(GenerationOptions::default().is_empty());
    //! ```

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GenerationOptions {
        pub temperature: Option<f32>,
        pub max_tokens: Option<u32>,
        pub top_k: Option<u32>,
    }

    impl GenerationOptions {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = Some(max_tokens);
            self
        }

        pub fn with_top_k(mut self, top_k: u32) -> Self {
            self.top_k = Some(top_k);
            self
        }

        pub fn is_empty(&self) -> bool {
            self.temperature.is_none() && self.max_tokens.is_none() && self.top_k.is_none()
        }
    }
}

pub mod config {
    //! Construction-time configuration errors and environment lookups.
    //!
    //! ```rust
    //! use gcommon::{ConfigurationError, env_parse};
    //!
    //! let missing: Result<Option<u32>, ConfigurationError> =
    //!     env_parse("GCOMMON_DOCTEST_UNSET_VARIABLE");
    //! assert_eq!(missing.expect("unset variable parses"), None);
    //! ```

    use std::error::Error;
    use std::fmt::{Display, Formatter};
    use std::str::FromStr;

    /// Invalid or missing configuration. Always fatal, never retried.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ConfigurationError {
        pub field: String,
        pub message: String,
    }

    impl ConfigurationError {
        pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
            Self {
                field: field.into(),
                message: message.into(),
            }
        }

        pub fn missing(field: impl Into<String>) -> Self {
            let field = field.into();
            let message = format!("{field} is required");
            Self {
                field,
                message,
            }
        }
    }

    impl Display for ConfigurationError {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "configuration error ({}): {}", self.field, self.message)
        }
    }

    impl Error for ConfigurationError {}

    /// Reads a variable, treating blank values as unset.
    pub fn env_var(name: &str) -> Option<String> {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    pub fn require_env(name: &str) -> Result<String, ConfigurationError> {
        env_var(name).ok_or_else(|| ConfigurationError::missing(name))
    }

    pub fn env_parse<T>(name: &str) -> Result<Option<T>, ConfigurationError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match env_var(name) {
            Some(raw) => raw.parse::<T>().map(Some).map_err(|error| {
                ConfigurationError::new(name, format!("cannot parse '{raw}': {error}"))
            }),
            None => Ok(None),
        }
    }
}

pub use config::{ConfigurationError, env_parse, env_var, require_env};
pub use context::{MetadataMap, SessionId};
pub use future::BoxFuture;
pub use model::GenerationOptions;
pub use secret::SecretString;

#[cfg(test)]
mod tests {
    use super::{ConfigurationError, GenerationOptions, SecretString, SessionId};

    #[test]
    fn session_id_round_trips_strings() {
        let session = SessionId::new("session-1");

        assert_eq!(session.as_str(), "session-1");
        assert_eq!(session.to_string(), "session-1");
        assert_eq!(SessionId::from("session-1".to_string()), session);
    }

    #[test]
    fn generation_options_builder_helpers_set_values() {
        let options = GenerationOptions::default()
            .with_temperature(0.3)
            .with_max_tokens(123)
            .with_top_k(4);

        assert_eq!(options.temperature, Some(0.3));
        assert_eq!(options.max_tokens, Some(123));
        assert_eq!(options.top_k, Some(4));
    }

    #[test]
    fn secret_string_redacts_debug_output() {
        let secret = SecretString::new("very-secret");

        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(secret.expose(), "very-secret");
        assert!(SecretString::new("   ").is_empty());
    }

    #[test]
    fn configuration_error_names_the_field() {
        let error = ConfigurationError::missing("DATAROBOT_API_TOKEN");

        assert_eq!(error.field, "DATAROBOT_API_TOKEN");
        assert_eq!(
            error.to_string(),
            "configuration error (DATAROBOT_API_TOKEN): DATAROBOT_API_TOKEN is required"
        );
    }
}
