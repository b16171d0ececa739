//! # Provider Dispatcher
//!
//! Fans one request out to every registered provider and joins the results.
//!
//! The [`ProviderDispatcher`] holds an immutable provider set built once at
//! startup. [`ProviderDispatcher::run_all`] spawns one task per provider,
//! waits for all of them, hands the collected results to the result sink,
//! and returns them in registration order regardless of completion order.

use crate::application::error::ConfigurationError;
use crate::application::services::execution::ExecutionWrapper;
use crate::application::services::result_sink::ResultSink;
use crate::domain::entities::call_result::{CallResult, OutcomeKind};
use crate::domain::value_objects::ProviderName;
use crate::infrastructure::providers::http_client::HttpClient;
use crate::infrastructure::providers::params::RequestParams;
use crate::infrastructure::providers::traits::ApiProvider;
use futures::future::join_all;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Default per-provider timeout in milliseconds.
const DEFAULT_PER_PROVIDER_TIMEOUT_MS: u64 = 5000;

/// Default overall deadline in milliseconds.
const DEFAULT_DEADLINE_MS: u64 = 10000;

/// Configuration for a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Per-provider timeout in milliseconds.
    pub per_provider_timeout_ms: Option<u64>,
    /// Overall deadline in milliseconds, measured from the start of a dispatch.
    pub deadline_ms: Option<u64>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            per_provider_timeout_ms: Some(DEFAULT_PER_PROVIDER_TIMEOUT_MS),
            deadline_ms: Some(DEFAULT_DEADLINE_MS),
        }
    }
}

impl DispatchConfig {
    /// Creates a configuration with no time bounds.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            per_provider_timeout_ms: None,
            deadline_ms: None,
        }
    }

    /// Sets the per-provider timeout.
    #[must_use]
    pub fn with_per_provider_timeout(mut self, timeout_ms: u64) -> Self {
        self.per_provider_timeout_ms = Some(timeout_ms);
        self
    }

    /// Sets the overall deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }

    /// Builds the execution wrapper for a dispatch started at `started`.
    fn wrapper(&self, started: Instant) -> ExecutionWrapper {
        let mut wrapper = ExecutionWrapper::new();
        if let Some(ms) = self.per_provider_timeout_ms {
            wrapper = wrapper.with_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.deadline_ms {
            wrapper = wrapper.with_deadline(started + Duration::from_millis(ms));
        }
        wrapper
    }
}

/// Runs every registered provider concurrently.
#[derive(Debug)]
pub struct ProviderDispatcher {
    providers: Vec<Arc<dyn ApiProvider>>,
    config: DispatchConfig,
}

impl ProviderDispatcher {
    /// Creates a dispatcher over `providers`, kept in the given order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::DuplicateProvider` if two providers
    /// share an identity.
    pub fn new(
        providers: Vec<Arc<dyn ApiProvider>>,
        config: DispatchConfig,
    ) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::with_capacity(providers.len());
        for provider in &providers {
            let name = provider.name();
            if !seen.insert(name) {
                return Err(ConfigurationError::duplicate_provider(name));
            }
        }

        Ok(Self { providers, config })
    }

    /// Creates a dispatcher with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`ProviderDispatcher::new`].
    pub fn with_defaults(
        providers: Vec<Arc<dyn ApiProvider>>,
    ) -> Result<Self, ConfigurationError> {
        Self::new(providers, DispatchConfig::default())
    }

    /// Calls every provider and returns one result per provider, in
    /// registration order.
    ///
    /// Provider failures are captured in the results and persistence
    /// failures are absorbed by `sink`; neither changes what is returned.
    pub async fn run_all(
        &self,
        client: &HttpClient,
        sink: &ResultSink,
        params: RequestParams,
    ) -> Vec<CallResult> {
        if self.providers.is_empty() {
            return Vec::new();
        }

        let started = Instant::now();
        let wrapper = self.config.wrapper(started);
        let params = Arc::new(params);

        let handles: Vec<_> = self
            .providers
            .iter()
            .map(|provider| {
                let provider = Arc::clone(provider);
                let client = client.clone();
                let params = Arc::clone(&params);
                tokio::spawn(async move { wrapper.run(provider.as_ref(), &client, &params).await })
            })
            .collect();

        let results: Vec<CallResult> = join_all(handles)
            .await
            .into_iter()
            .zip(&self.providers)
            .map(|(joined, provider)| match joined {
                Ok(result) => result,
                Err(e) => CallResult::failure(
                    provider.name(),
                    format!("provider task failed: {}", e),
                    started.elapsed(),
                ),
            })
            .collect();

        log_summary(&results, started.elapsed());
        sink.persist(&results).await;
        results
    }

    /// Returns the registered provider identities in registration order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<ProviderName> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no provider is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

fn log_summary(results: &[CallResult], elapsed: Duration) {
    let count = |kind: OutcomeKind| results.iter().filter(|r| r.outcome() == kind).count();
    tracing::info!(
        providers = results.len(),
        succeeded = count(OutcomeKind::Success),
        invalid = count(OutcomeKind::ValidationError),
        failed = count(OutcomeKind::Failure),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "dispatch completed"
    );
}
