//! # Execution Wrapper
//!
//! Common timing and error-normalization layer around every provider call.
//!
//! [`ExecutionWrapper::run`] never fails: every exit path, including a
//! timeout or a panicking provider, yields a [`CallResult`] with the elapsed
//! time recorded.

use crate::domain::entities::call_result::CallResult;
use crate::domain::value_objects::ProviderName;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::http_client::HttpClient;
use crate::infrastructure::providers::params::RequestParams;
use crate::infrastructure::providers::traits::ApiProvider;
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::time::Instant;

/// Wraps a provider call with timing, bounding and outcome classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionWrapper {
    /// Maximum duration of a single call.
    timeout: Option<Duration>,
    /// Absolute instant after which a pending call is aborted.
    deadline: Option<Instant>,
}

impl ExecutionWrapper {
    /// Creates a wrapper with no bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds each call to `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Aborts calls still pending at `deadline`.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the per-call timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the absolute deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Runs one provider call and normalizes its outcome.
    pub async fn run(
        &self,
        provider: &dyn ApiProvider,
        client: &HttpClient,
        params: &RequestParams,
    ) -> CallResult {
        let name = provider.name();
        let start = Instant::now();

        let fetch = AssertUnwindSafe(provider.fetch(client, params)).catch_unwind();
        let outcome = match self.limit_from(start) {
            Some(limit) => match tokio::time::timeout_at(limit, fetch).await {
                Ok(caught) => caught,
                Err(_) => Ok(Err(ProviderError::timeout_with_duration(
                    "call exceeded its time limit",
                    duration_millis(limit.saturating_duration_since(start)),
                ))),
            },
            None => fetch.await,
        };

        let elapsed = start.elapsed();
        let result = match outcome {
            Ok(fetched) => classify(name, fetched, elapsed),
            Err(panic) => CallResult::failure(
                name,
                format!("provider panicked: {}", panic_message(panic.as_ref())),
                elapsed,
            ),
        };

        tracing::debug!(
            provider = %name,
            outcome = %result.outcome(),
            elapsed_ms = result.response_time_ms(),
            "provider call completed"
        );
        result
    }

    /// Earliest instant at which a call started at `start` must be aborted.
    fn limit_from(&self, start: Instant) -> Option<Instant> {
        let by_timeout = self.timeout.map(|t| start + t);
        match (by_timeout, self.deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Maps a raw fetch outcome to a [`CallResult`].
///
/// Timeouts become a `Failure` with the `"Timeout"` message, validation
/// errors become `ValidationError`, and all other errors become `Failure`
/// carrying the error description.
#[must_use]
pub fn classify(
    provider: ProviderName,
    fetched: ProviderResult<Value>,
    elapsed: Duration,
) -> CallResult {
    match fetched {
        Ok(payload) => CallResult::success(provider, payload, elapsed),
        Err(error) if error.is_timeout() => CallResult::timeout(provider, elapsed),
        Err(error) if error.is_validation() => {
            CallResult::validation_error(provider, error.to_string(), elapsed)
        }
        Err(error) => CallResult::failure(provider, error.to_string(), elapsed),
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
