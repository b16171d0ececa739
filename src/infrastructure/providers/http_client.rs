//! # HTTP Client
//!
//! Shared, connection-pooled HTTP client handed to every provider.
//!
//! The client is built once by the embedding application and cloned into
//! each concurrent provider call; clones share the same connection pool.
//! Transport failures are mapped to [`ProviderError`] variants so providers
//! can use `?` directly.
//!
//! # Examples
//!
//! ```ignore
//! use api_fanout::infrastructure::providers::http_client::{HttpClient, bearer_headers};
//!
//! let client = HttpClient::new(5000)?;
//! let body = client
//!     .get_with_headers("https://api.example.com/me", bearer_headers("token")?)
//!     .await?;
//! ```

use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// HTTP client wrapper for providers.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> ProviderResult<Self> {
        Self::with_headers(timeout_ms, HeaderMap::new())
    }

    /// Creates a new HTTP client with default headers sent on every request.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Internal` if the client cannot be created.
    pub fn with_headers(timeout_ms: u64, default_headers: HeaderMap) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(default_headers)
            .build()
            .map_err(|e| ProviderError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails or the status is not
    /// successful, and `ProviderError::Protocol` if the body is not JSON.
    pub async fn get(&self, url: &str) -> ProviderResult<Value> {
        self.get_with_headers(url, HeaderMap::new()).await
    }

    /// Makes a GET request with additional headers.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::get`].
    pub async fn get_with_headers(&self, url: &str, headers: HeaderMap) -> ProviderResult<Value> {
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a POST request with a URL-encoded form body and additional headers.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::get`].
    pub async fn post_form_with_headers<F: Serialize + ?Sized>(
        &self,
        url: &str,
        form: &F,
        headers: HeaderMap,
    ) -> ProviderResult<Value> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .form(form)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Checks the status and decodes the JSON body.
    async fn handle_response(&self, response: Response) -> ProviderResult<Value> {
        let status = response.status();

        if status.is_success() {
            response.json::<Value>().await.map_err(|e| {
                if e.is_timeout() {
                    self.timeout_error()
                } else {
                    ProviderError::protocol(format!("Failed to parse response: {}", e))
                }
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ProviderError::status(status.as_u16(), body))
        }
    }

    fn map_reqwest_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            self.timeout_error()
        } else if error.is_connect() {
            ProviderError::connection(format!("Connection failed: {}", error))
        } else {
            ProviderError::connection(format!("HTTP request failed: {}", error))
        }
    }

    fn timeout_error(&self) -> ProviderError {
        ProviderError::timeout_with_duration(
            format!("Request timed out after {}ms", self.timeout_ms),
            self.timeout_ms,
        )
    }
}

/// Builds an `Authorization: Bearer <token>` header map.
///
/// # Errors
///
/// Returns `ProviderError::Validation` if the token contains characters that
/// are not allowed in a header value.
pub fn bearer_headers(token: &str) -> ProviderResult<HeaderMap> {
    let value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| ProviderError::validation("token contains invalid header characters"))?;
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}
