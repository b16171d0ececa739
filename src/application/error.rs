//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Provider and persistence failures are contained inside the execution
//! wrapper and the result sink. The only class that crosses the dispatcher's
//! public boundary is [`ConfigurationError`], which signals a deployment or
//! programming mistake.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Configuration(ConfigurationError) - duplicate providers, bad settings
//! ├── Provider(ProviderError)           - transport client could not be built
//! └── Persistence(PersistenceError)     - log store could not be opened
//! ```
//!
//! # Examples
//!
//! ```
//! use api_fanout::application::error::{ApplicationError, ConfigurationError};
//! use api_fanout::domain::value_objects::ProviderName;
//!
//! let err = ConfigurationError::duplicate_provider(ProviderName::ServiceA);
//! assert_eq!(err.to_string(), "duplicate provider registration: service_a");
//!
//! let app_err: ApplicationError = err.into();
//! assert!(app_err.is_configuration());
//! ```

use crate::domain::value_objects::ProviderName;
use crate::infrastructure::persistence::PersistenceError;
use crate::infrastructure::providers::ProviderError;
use thiserror::Error;

/// Configuration or registration mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Two providers share the same identity.
    #[error("duplicate provider registration: {provider}")]
    DuplicateProvider {
        /// The duplicated identity.
        provider: ProviderName,
    },

    /// Settings could not be loaded or are invalid.
    #[error("invalid settings: {0}")]
    Settings(String),
}

impl ConfigurationError {
    /// Creates a duplicate provider error.
    #[must_use]
    pub fn duplicate_provider(provider: ProviderName) -> Self {
        Self::DuplicateProvider { provider }
    }

    /// Creates a settings error.
    #[must_use]
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings(message.into())
    }
}

impl From<config::ConfigError> for ConfigurationError {
    fn from(error: config::ConfigError) -> Self {
        Self::Settings(error.to_string())
    }
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Provider infrastructure error.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Persistence infrastructure error.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl ApplicationError {
    /// Returns true if this is a configuration error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_provider_display() {
        let err = ConfigurationError::duplicate_provider(ProviderName::KakaoProfile);
        assert!(err.to_string().contains("kakao_profile"));
    }

    #[test]
    fn settings_from_config_error() {
        let err: ConfigurationError = config::ConfigError::Message("missing key".into()).into();
        assert_eq!(err, ConfigurationError::settings("missing key"));
    }

    #[test]
    fn application_error_from_parts() {
        let err: ApplicationError = PersistenceError::connection("refused").into();
        assert!(!err.is_configuration());
        assert!(err.to_string().contains("refused"));

        let err: ApplicationError = ProviderError::internal("tls").into();
        assert!(err.to_string().starts_with("provider error"));
    }
}
