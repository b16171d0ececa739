//! # api-fanout
//!
//! Concurrent fan-out dispatcher for third-party API providers.
//!
//! One request is sent to every registered provider at once. Each call is
//! timed and classified into a uniform [`CallResult`], and the results of a
//! dispatch are written to the call log in a single transaction.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use api_fanout::application::services::{ProviderDispatcher, ResultSink};
//! use api_fanout::infrastructure::persistence::InMemoryCallLogStore;
//! use api_fanout::infrastructure::providers::{
//!     ApiProvider, HttpClient, KakaoProfileApi, RequestParams,
//! };
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let providers: Vec<Arc<dyn ApiProvider>> = vec![Arc::new(KakaoProfileApi::new())];
//! let dispatcher = ProviderDispatcher::with_defaults(providers)?;
//! let sink = ResultSink::new(Arc::new(InMemoryCallLogStore::new()));
//! let client = HttpClient::new(5000)?;
//!
//! let params = RequestParams::new()
//!     .with("user_id", json!("u-1"))
//!     .with("kakao_token", json!("token"));
//! for result in dispatcher.run_all(&client, &sink, params).await {
//!     println!("{result}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`CallResult`]: domain::entities::CallResult

pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
