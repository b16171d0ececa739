//! # Kakao Providers
//!
//! Providers for the Kakao REST API.
//!
//! - [`KakaoProfileApi`]: `GET /v2/user/me`
//! - [`KakaoSendMessageApi`]: `POST /v2/api/talk/memo/default/send`
//!
//! Both validate their request parameters before any network I/O and
//! validate the upstream response against a typed schema, returning only
//! the fields the schema declares.

use crate::domain::value_objects::ProviderName;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::http_client::{HttpClient, bearer_headers};
use crate::infrastructure::providers::params::{RequestParams, to_payload, validate_response};
use crate::infrastructure::providers::traits::ApiProvider;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;

/// Production Kakao API host.
pub const KAKAO_API_BASE_URL: &str = "https://kapi.kakao.com";

/// Request schema for the profile lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct KakaoProfileRequest {
    /// Internal user identifier.
    pub user_id: String,
    /// Kakao access token.
    pub kakao_token: String,
}

/// Response schema for the profile lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KakaoProfileResponse {
    /// Kakao account identifier.
    pub id: i64,
    /// When the user connected the app.
    pub connected_at: String,
    /// Profile properties such as the nickname.
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

/// Kakao user profile provider.
#[derive(Debug, Clone)]
pub struct KakaoProfileApi {
    base_url: String,
}

impl KakaoProfileApi {
    /// Creates a provider pointing at the production Kakao host.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(KAKAO_API_BASE_URL)
    }

    /// Creates a provider pointing at a custom host.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/v2/user/me", self.base_url)
    }
}

impl Default for KakaoProfileApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiProvider for KakaoProfileApi {
    fn name(&self) -> ProviderName {
        ProviderName::KakaoProfile
    }

    async fn fetch(&self, client: &HttpClient, params: &RequestParams) -> ProviderResult<Value> {
        let request: KakaoProfileRequest = params.extract()?;
        let raw = client
            .get_with_headers(&self.endpoint(), bearer_headers(&request.kakao_token)?)
            .await?;
        let response: KakaoProfileResponse = validate_response(raw)?;
        to_payload(&response)
    }
}

/// Request schema for the "send to me" message.
#[derive(Debug, Clone, Deserialize)]
pub struct KakaoSendMessageRequest {
    /// Internal user identifier.
    pub user_id: String,
    /// Kakao access token.
    pub kakao_token: String,
    /// Message text.
    pub message: String,
    /// Link opened from the message, if any.
    #[serde(default)]
    pub link_url: Option<String>,
}

/// Response schema for the "send to me" message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KakaoSendMessageResponse {
    /// Zero on success.
    pub result_code: i64,
}

/// Kakao talk "send to me" message provider.
#[derive(Debug, Clone)]
pub struct KakaoSendMessageApi {
    base_url: String,
}

impl KakaoSendMessageApi {
    /// Creates a provider pointing at the production Kakao host.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(KAKAO_API_BASE_URL)
    }

    /// Creates a provider pointing at a custom host.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/v2/api/talk/memo/default/send", self.base_url)
    }

    fn template_object(request: &KakaoSendMessageRequest) -> String {
        let link = match &request.link_url {
            Some(url) => json!({ "web_url": url, "mobile_web_url": url }),
            None => json!({}),
        };
        json!({
            "object_type": "text",
            "text": request.message,
            "link": link,
        })
        .to_string()
    }
}

impl Default for KakaoSendMessageApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiProvider for KakaoSendMessageApi {
    fn name(&self) -> ProviderName {
        ProviderName::KakaoSendMessage
    }

    async fn fetch(&self, client: &HttpClient, params: &RequestParams) -> ProviderResult<Value> {
        let request: KakaoSendMessageRequest = params.extract()?;
        let form = [("template_object", Self::template_object(&request))];
        let raw = client
            .post_form_with_headers(
                &self.endpoint(),
                &form,
                bearer_headers(&request.kakao_token)?,
            )
            .await?;
        let response: KakaoSendMessageResponse = validate_response(raw)?;
        if response.result_code != 0 {
            return Err(ProviderError::validation(format!(
                "unexpected result_code {}",
                response.result_code
            )));
        }
        to_payload(&response)
    }
}
