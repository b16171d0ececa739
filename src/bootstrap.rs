//! # Bootstrap
//!
//! Builds the long-lived components of a running process from
//! [`AppConfig`]: the shared HTTP client, the call log store and the
//! registered providers.

use crate::application::error::ApplicationResult;
use crate::application::services::{ProviderDispatcher, ResultSink};
use crate::config::AppConfig;
use crate::infrastructure::persistence::{CallLogStore, InMemoryCallLogStore, PostgresCallLogStore};
use crate::infrastructure::providers::{
    ApiProvider, HttpClient, KakaoProfileApi, KakaoSendMessageApi,
};
use std::sync::Arc;

/// Everything needed to run dispatches.
#[derive(Debug)]
pub struct Runtime {
    /// Shared HTTP client.
    pub client: HttpClient,
    /// Provider dispatcher.
    pub dispatcher: ProviderDispatcher,
    /// Result sink over the configured store.
    pub sink: ResultSink,
}

impl Runtime {
    /// Builds every component described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, the database
    /// is unreachable, or the provider set is invalid.
    pub async fn build(config: &AppConfig) -> ApplicationResult<Self> {
        let client = build_http_client(config)?;
        let store = connect_store(config).await?;
        let dispatcher = ProviderDispatcher::new(default_providers(config), config.dispatch)?;

        tracing::info!(
            providers = dispatcher.len(),
            persistent = config.database.url.is_some(),
            "runtime ready"
        );

        Ok(Self {
            client,
            dispatcher,
            sink: ResultSink::new(store),
        })
    }
}

/// Builds the shared HTTP client.
///
/// # Errors
///
/// Returns `ApplicationError::Provider` if the client cannot be built.
pub fn build_http_client(config: &AppConfig) -> ApplicationResult<HttpClient> {
    Ok(HttpClient::new(config.http.timeout_ms)?)
}

/// Opens the configured call log store.
///
/// A PostgreSQL store is used when a database URL is configured, an
/// in-memory store otherwise.
///
/// # Errors
///
/// Returns `ApplicationError::Persistence` if the database is unreachable.
pub async fn connect_store(config: &AppConfig) -> ApplicationResult<Arc<dyn CallLogStore>> {
    match &config.database.url {
        Some(url) => {
            let store = PostgresCallLogStore::connect(url, config.database.max_connections).await?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("no database configured; call logs are kept in memory");
            Ok(Arc::new(InMemoryCallLogStore::new()))
        }
    }
}

/// Returns the built-in providers, pointed at the configured endpoints.
#[must_use]
pub fn default_providers(config: &AppConfig) -> Vec<Arc<dyn ApiProvider>> {
    let base_url = &config.providers.kakao_base_url;
    vec![
        Arc::new(KakaoProfileApi::with_base_url(base_url.as_str())),
        Arc::new(KakaoSendMessageApi::with_base_url(base_url.as_str())),
    ]
}
