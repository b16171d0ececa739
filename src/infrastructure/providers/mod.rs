//! # Providers
//!
//! External API integrations and the shared transport they run on.
//!
//! - [`ApiProvider`]: port every integration implements
//! - [`HttpClient`]: shared pooled HTTP client
//! - [`RequestParams`]: opaque parameter bag
//! - [`kakao`]: Kakao REST API providers

pub mod error;
pub mod http_client;
pub mod kakao;
pub mod params;
pub mod traits;

pub use error::{ProviderError, ProviderResult};
pub use http_client::HttpClient;
pub use kakao::{KakaoProfileApi, KakaoSendMessageApi};
pub use params::RequestParams;
pub use traits::ApiProvider;
