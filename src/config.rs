//! # Configuration
//!
//! Runtime settings loaded from defaults, an optional file and the
//! environment.
//!
//! Sources are layered in that order, later ones winning. Environment
//! variables use the `FANOUT` prefix and `__` as the nesting separator:
//!
//! ```text
//! FANOUT__HTTP__TIMEOUT_MS=3000
//! FANOUT__DISPATCH__DEADLINE_MS=8000
//! FANOUT__DATABASE__URL=postgres://localhost/fanout
//! FANOUT__LOG_FORMAT=json
//! ```

use crate::application::error::ConfigurationError;
use crate::application::services::DispatchConfig;
use crate::infrastructure::providers::kakao::KAKAO_API_BASE_URL;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FANOUT";

/// Nesting separator for environment variables.
pub const ENV_SEPARATOR: &str = "__";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Shared HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Transport-level request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_ms: 5000 }
    }
}

/// Call log database settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL. The in-memory store is used when absent.
    pub url: Option<String>,
    /// Maximum pool size.
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

/// Provider endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Base URL of the Kakao REST API.
    pub kakao_base_url: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kakao_base_url: KAKAO_API_BASE_URL.to_string(),
        }
    }
}

/// Top-level application settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings.
    pub http: HttpSettings,
    /// Dispatch bounds.
    pub dispatch: DispatchConfig,
    /// Call log database settings.
    pub database: DatabaseSettings,
    /// Provider endpoints.
    pub providers: ProviderSettings,
    /// Log output format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Loads settings from `.env`, the optional file at `path`, and the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::Settings` if a source cannot be read or
    /// the merged settings are invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(ConfigurationError::settings(format!(".env: {}", e))),
        }

        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        Self::from_builder(builder.add_source(environment()))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigurationError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges the type system does not express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::Settings` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.http.timeout_ms == 0 {
            return Err(ConfigurationError::settings("http.timeout_ms must be positive"));
        }
        if self.dispatch.per_provider_timeout_ms == Some(0) {
            return Err(ConfigurationError::settings(
                "dispatch.per_provider_timeout_ms must be positive",
            ));
        }
        if self.dispatch.deadline_ms == Some(0) {
            return Err(ConfigurationError::settings("dispatch.deadline_ms must be positive"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigurationError::settings(
                "database.max_connections must be positive",
            ));
        }
        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}
