//! # Call Log
//!
//! Persisted projection of [`CallResult`].
//!
//! [`CallLogEntry`] is the write-side shape handed to a log store;
//! [`CallLogRecord`] is what the store holds once the entry has been
//! committed and the server has assigned its identifier and creation time.
//! Records are append-only.

use crate::domain::entities::call_result::{CallResult, OutcomeKind};
use crate::domain::value_objects::{LogId, ProviderName, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A call log entry awaiting persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallLogEntry {
    /// Provider identifier.
    pub provider: ProviderName,
    /// Outcome classification.
    pub outcome: OutcomeKind,
    /// True if the call failed validation.
    pub is_validation_error: bool,
    /// Elapsed time in milliseconds.
    pub response_time_ms: f64,
    /// Structured payload for successful calls.
    pub data: Option<Value>,
    /// Error text for unsuccessful calls.
    pub error_message: Option<String>,
}

impl From<&CallResult> for CallLogEntry {
    fn from(result: &CallResult) -> Self {
        Self {
            provider: result.provider(),
            outcome: result.outcome(),
            is_validation_error: result.is_validation_error(),
            response_time_ms: result.response_time_ms(),
            data: result.payload().cloned(),
            error_message: result.error_message().map(str::to_owned),
        }
    }
}

/// A committed call log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallLogRecord {
    /// Server-assigned identifier.
    pub id: LogId,
    /// The logged entry.
    #[serde(flatten)]
    pub entry: CallLogEntry,
    /// Server-assigned creation time.
    pub created_at: Timestamp,
}

impl CallLogRecord {
    /// Creates a record from its parts.
    #[must_use]
    pub fn new(id: LogId, entry: CallLogEntry, created_at: Timestamp) -> Self {
        Self {
            id,
            entry,
            created_at,
        }
    }

    /// Returns the provider this record belongs to.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> ProviderName {
        self.entry.provider
    }
}
