//! # Call Result
//!
//! Normalized outcome of one provider invocation.
//!
//! A [`CallResult`] is produced exactly once per call attempt and is never
//! mutated afterwards. Only the named constructors exist, so a result always
//! carries a payload on success and an error message otherwise.
//!
//! # Examples
//!
//! ```
//! use api_fanout::domain::entities::call_result::{CallResult, OutcomeKind};
//! use api_fanout::domain::value_objects::ProviderName;
//! use std::time::Duration;
//!
//! let result = CallResult::timeout(ProviderName::ServiceA, Duration::from_millis(50));
//! assert_eq!(result.outcome(), OutcomeKind::Failure);
//! assert_eq!(result.error_message(), Some("Timeout"));
//! assert!(result.payload().is_none());
//! ```

use crate::domain::value_objects::ProviderName;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Error message recorded for timed-out calls.
pub const TIMEOUT_MESSAGE: &str = "Timeout";

/// Classification of a call outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    /// The provider returned validated data.
    Success,
    /// Request parameters or response data failed shape checks.
    ValidationError,
    /// Transport or unclassified failure.
    Failure,
}

impl OutcomeKind {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::Failure => "FAILURE",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform result envelope for a provider call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallResult {
    /// Provider that produced this result.
    provider: ProviderName,
    /// Outcome classification.
    outcome: OutcomeKind,
    /// Structured data, present iff the call succeeded.
    payload: Option<Value>,
    /// Failure description, present iff the call did not succeed.
    error_message: Option<String>,
    /// Wall-clock time spent in the call.
    #[serde(rename = "response_time_ms", serialize_with = "serialize_millis")]
    elapsed: Duration,
}

impl CallResult {
    /// Creates a successful result.
    #[must_use]
    pub fn success(provider: ProviderName, payload: Value, elapsed: Duration) -> Self {
        Self {
            provider,
            outcome: OutcomeKind::Success,
            payload: Some(payload),
            error_message: None,
            elapsed,
        }
    }

    /// Creates a validation-error result.
    #[must_use]
    pub fn validation_error(
        provider: ProviderName,
        message: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            provider,
            outcome: OutcomeKind::ValidationError,
            payload: None,
            error_message: Some(message.into()),
            elapsed,
        }
    }

    /// Creates a failure result.
    #[must_use]
    pub fn failure(provider: ProviderName, message: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            provider,
            outcome: OutcomeKind::Failure,
            payload: None,
            error_message: Some(message.into()),
            elapsed,
        }
    }

    /// Creates a timeout failure with the [`TIMEOUT_MESSAGE`] error text.
    #[must_use]
    pub fn timeout(provider: ProviderName, elapsed: Duration) -> Self {
        Self::failure(provider, TIMEOUT_MESSAGE, elapsed)
    }

    /// Returns the provider that produced this result.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> ProviderName {
        self.provider
    }

    /// Returns the outcome classification.
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> OutcomeKind {
        self.outcome
    }

    /// Returns the payload, present only on success.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Returns the error text, absent on success.
    #[inline]
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the time spent in the call.
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns the elapsed time in fractional milliseconds.
    #[must_use]
    pub fn response_time_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Returns true if the call succeeded.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome == OutcomeKind::Success
    }

    /// Returns true if the call failed validation.
    #[inline]
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        self.outcome == OutcomeKind::ValidationError
    }

    /// Returns true if this is a timeout failure.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.outcome == OutcomeKind::Failure && self.error_message() == Some(TIMEOUT_MESSAGE)
    }
}

impl fmt::Display for CallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CallResult({}: {} in {:.1}ms",
            self.provider,
            self.outcome,
            self.response_time_ms()
        )?;
        if let Some(message) = &self.error_message {
            write!(f, " - {}", message)?;
        }
        write!(f, ")")
    }
}

fn serialize_millis<S: serde::Serializer>(elapsed: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    mod outcome_kind {
        use super::*;

        #[test]
        fn display() {
            assert_eq!(OutcomeKind::Success.to_string(), "SUCCESS");
            assert_eq!(OutcomeKind::ValidationError.to_string(), "VALIDATION_ERROR");
            assert_eq!(OutcomeKind::Failure.to_string(), "FAILURE");
        }

        #[test]
        fn serde_matches_display() {
            let json = serde_json::to_string(&OutcomeKind::ValidationError).unwrap();
            assert_eq!(json, "\"VALIDATION_ERROR\"");
        }
    }

    mod call_result {
        use super::*;

        #[test]
        fn accessors_expose_fields() {
            let result = CallResult::failure(
                ProviderName::KakaoSendMessage,
                "connection refused",
                Duration::from_millis(7),
            );
            assert_eq!(result.provider(), ProviderName::KakaoSendMessage);
            assert_eq!(result.outcome(), OutcomeKind::Failure);
            assert!(result.payload().is_none());
            assert_eq!(result.error_message(), Some("connection refused"));
            assert_eq!(result.elapsed(), Duration::from_millis(7));
        }

        #[test]
        fn success_carries_payload_only() {
            let result = CallResult::success(
                ProviderName::ServiceA,
                json!({"x": 1}),
                Duration::from_millis(10),
            );
            assert!(result.is_success());
            assert_eq!(result.payload(), Some(&json!({"x": 1})));
            assert!(result.error_message().is_none());
            assert!(!result.is_timeout());
        }

        #[test]
        fn validation_error_carries_message_only() {
            let result = CallResult::validation_error(
                ProviderName::ServiceB,
                "missing field `id`",
                Duration::from_millis(3),
            );
            assert!(result.is_validation_error());
            assert!(result.payload().is_none());
            assert_eq!(result.error_message(), Some("missing field `id`"));
        }

        #[test]
        fn timeout_is_failure_with_fixed_message() {
            let result = CallResult::timeout(ProviderName::ServiceC, Duration::from_millis(50));
            assert_eq!(result.outcome(), OutcomeKind::Failure);
            assert_eq!(result.error_message(), Some(TIMEOUT_MESSAGE));
            assert!(result.is_timeout());
        }

        #[test]
        fn response_time_ms_is_fractional() {
            let result = CallResult::failure(
                ProviderName::ServiceA,
                "boom",
                Duration::from_micros(12_500),
            );
            assert!((result.response_time_ms() - 12.5).abs() < 1e-9);
        }

        #[test]
        fn serializes_elapsed_as_millis() {
            let result = CallResult::success(
                ProviderName::KakaoProfile,
                json!({"id": 7}),
                Duration::from_millis(20),
            );
            let value = serde_json::to_value(&result).unwrap();
            assert_eq!(value["provider"], "kakao_profile");
            assert_eq!(value["outcome"], "SUCCESS");
            assert_eq!(value["payload"]["id"], 7);
            assert!(value["error_message"].is_null());
            assert!((value["response_time_ms"].as_f64().unwrap() - 20.0).abs() < 1e-9);
        }

        #[test]
        fn display_includes_error() {
            let result = CallResult::timeout(ProviderName::ServiceB, Duration::from_millis(5));
            let display = result.to_string();
            assert!(display.contains("service_b"));
            assert!(display.contains("FAILURE"));
            assert!(display.contains("Timeout"));
        }
    }
}
