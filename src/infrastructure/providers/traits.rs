//! # Provider Trait
//!
//! Port definition for external API integrations.
//!
//! Every external API is wrapped by one [`ApiProvider`] implementation.
//! Providers only know how to talk to their API: they don't time
//! themselves, log, or catch errors. Those concerns belong to the execution
//! wrapper, so adding a provider never requires touching existing providers
//! or the dispatcher.
//!
//! # Examples
//!
//! ```ignore
//! use api_fanout::infrastructure::providers::traits::ApiProvider;
//!
//! #[derive(Debug)]
//! struct WeatherApi;
//!
//! #[async_trait::async_trait]
//! impl ApiProvider for WeatherApi {
//!     fn name(&self) -> ProviderName { ProviderName::ServiceA }
//!
//!     async fn fetch(&self, client: &HttpClient, params: &RequestParams)
//!         -> ProviderResult<serde_json::Value> {
//!         client.get("https://weather.example.com/now").await
//!     }
//! }
//! ```

use crate::domain::value_objects::ProviderName;
use crate::infrastructure::providers::error::ProviderResult;
use crate::infrastructure::providers::http_client::HttpClient;
use crate::infrastructure::providers::params::RequestParams;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Trait implemented by every external API integration.
#[async_trait]
pub trait ApiProvider: Send + Sync + fmt::Debug {
    /// Returns the provider identity. Constant for the instance.
    fn name(&self) -> ProviderName;

    /// Calls the external API and returns its structured data.
    ///
    /// # Errors
    ///
    /// - `ProviderError::Validation` - parameters or response failed shape checks
    /// - `ProviderError::Timeout` - the upstream did not answer in time
    /// - `ProviderError::Connection` / `ProviderError::Status` - transport failures
    async fn fetch(&self, client: &HttpClient, params: &RequestParams) -> ProviderResult<Value>;
}
