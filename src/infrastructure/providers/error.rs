//! # Provider Errors
//!
//! Error types for provider fetch operations.
//!
//! Errors fall in two groups: transport errors (timeouts, connection
//! failures, non-success status codes, undecodable bodies) and validation
//! errors (request parameters or response data that fail shape checks).
//! The execution wrapper uses this split to classify a call's outcome.
//!
//! # Examples
//!
//! ```
//! use api_fanout::infrastructure::providers::error::ProviderError;
//!
//! let error = ProviderError::timeout("request timed out after 5000ms");
//! assert!(error.is_timeout());
//! assert!(error.is_transport());
//!
//! let error = ProviderError::validation("missing field `id`");
//! assert!(error.is_validation());
//! assert!(!error.is_transport());
//! ```

use thiserror::Error;

/// Error type for provider operations.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Request timed out.
    #[error("provider timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error.
    #[error("provider connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Upstream answered with a non-success status code.
    #[error("provider returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Request parameters or response data failed shape checks.
    #[error("{message}")]
    Validation {
        /// Description of the offending field(s).
        message: String,
    },

    /// Response could not be decoded.
    #[error("provider protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// Internal error, e.g. a client that could not be built.
    #[error("provider internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl ProviderError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns true if the data failed shape checks.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true if this is a transport-level failure.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::Status { .. }
        )
    }

    /// Returns the HTTP status code, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the timeout duration in milliseconds, if known.
    #[must_use]
    pub fn timeout_ms(&self) -> Option<u64> {
        match self {
            Self::Timeout { timeout_ms, .. } => *timeout_ms,
            _ => None,
        }
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_transport() {
        let error = ProviderError::timeout_with_duration("slow", 5000);
        assert!(error.is_timeout());
        assert!(error.is_transport());
        assert!(!error.is_validation());
        assert_eq!(error.timeout_ms(), Some(5000));
    }

    #[test]
    fn status_is_transport() {
        let error = ProviderError::status(503, "unavailable");
        assert!(error.is_transport());
        assert_eq!(error.status_code(), Some(503));
        assert_eq!(error.to_string(), "provider returned HTTP 503: unavailable");
    }

    #[test]
    fn validation_is_not_transport() {
        let error = ProviderError::validation("missing field `id`");
        assert!(error.is_validation());
        assert!(!error.is_transport());
        assert_eq!(error.status_code(), None);
    }

    #[test]
    fn validation_display_is_bare_message() {
        let error = ProviderError::validation("missing field `kakao_token`");
        assert_eq!(error.to_string(), "missing field `kakao_token`");
    }

    #[test]
    fn protocol_and_internal_are_neither() {
        for error in [
            ProviderError::protocol("bad json"),
            ProviderError::internal("no client"),
        ] {
            assert!(!error.is_transport());
            assert!(!error.is_validation());
            assert!(!error.is_timeout());
        }
    }

    #[test]
    fn display_format() {
        let error = ProviderError::connection("refused");
        let display = error.to_string();
        assert!(display.contains("connection"));
        assert!(display.contains("refused"));
    }
}
