//! # Request Parameters
//!
//! Opaque key/value parameter bag passed to every provider, plus the
//! schema-validation helpers providers use on both sides of a call.
//!
//! Each provider pulls only the keys it needs via [`RequestParams::extract`]
//! and ignores the rest, so one bag can serve providers with different
//! request shapes.
//!
//! # Examples
//!
//! ```
//! use api_fanout::infrastructure::providers::params::RequestParams;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Lookup {
//!     user_id: String,
//! }
//!
//! let params = RequestParams::new()
//!     .with("user_id", "user_123")
//!     .with("unused", 42);
//!
//! let lookup: Lookup = params.extract().unwrap();
//! assert_eq!(lookup.user_id, "user_123");
//! ```

use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied parameters for one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams(Map<String, Value>);

impl RequestParams {
    /// Creates an empty parameter bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any previous value under the same key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns a parameter by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the bag holds no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deserializes a typed request from the bag.
    ///
    /// Keys not present in `T` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Validation` naming the missing or mistyped
    /// field.
    pub fn extract<T: DeserializeOwned>(&self) -> ProviderResult<T> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| {
            ProviderError::validation(format!("invalid request parameters: {}", e))
        })
    }
}

impl From<Map<String, Value>> for RequestParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Validates raw response data against a typed response schema.
///
/// # Errors
///
/// Returns `ProviderError::Validation` naming the missing or mistyped field.
pub fn validate_response<T: DeserializeOwned>(raw: Value) -> ProviderResult<T> {
    serde_json::from_value(raw)
        .map_err(|e| ProviderError::validation(format!("invalid response data: {}", e)))
}

/// Serializes a validated response back into structured data.
///
/// # Errors
///
/// Returns `ProviderError::Internal` if serialization fails.
pub fn to_payload<T: Serialize>(response: &T) -> ProviderResult<Value> {
    serde_json::to_value(response)
        .map_err(|e| ProviderError::internal(format!("failed to serialize response: {}", e)))
}
