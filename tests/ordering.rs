//! Property: results come back one per provider, in registration order.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use api_fanout::application::services::{DispatchConfig, ProviderDispatcher, ResultSink};
use api_fanout::domain::value_objects::ProviderName;
use api_fanout::infrastructure::persistence::InMemoryCallLogStore;
use api_fanout::infrastructure::providers::{
    ApiProvider, HttpClient, ProviderError, ProviderResult, RequestParams,
};
use async_trait::async_trait;
use proptest::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
struct DelayedProvider {
    name: ProviderName,
    delay: Duration,
    fail: bool,
}

#[async_trait]
impl ApiProvider for DelayedProvider {
    fn name(&self) -> ProviderName {
        self.name
    }

    async fn fetch(&self, _client: &HttpClient, _params: &RequestParams) -> ProviderResult<Value> {
        tokio::time::sleep(self.delay).await;
        if self.fail {
            Err(ProviderError::connection("connection reset"))
        } else {
            Ok(json!({"provider": self.name.as_str()}))
        }
    }
}

fn dispatch(specs: &[(u64, bool)]) -> (Vec<ProviderName>, Vec<ProviderName>, usize) {
    let providers: Vec<Arc<dyn ApiProvider>> = specs
        .iter()
        .zip(ProviderName::ALL)
        .map(|((delay_ms, fail), name)| {
            Arc::new(DelayedProvider {
                name,
                delay: Duration::from_millis(*delay_ms),
                fail: *fail,
            }) as Arc<dyn ApiProvider>
        })
        .collect();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .unwrap();

    runtime.block_on(async move {
        let dispatcher = ProviderDispatcher::new(providers, DispatchConfig::unbounded()).unwrap();
        let expected = dispatcher.provider_names();
        let store = InMemoryCallLogStore::new();
        let sink = ResultSink::new(Arc::new(store.clone()));
        let client = HttpClient::new(1000).unwrap();

        let results = dispatcher.run_all(&client, &sink, RequestParams::new()).await;
        let returned = results.iter().map(|r| r.provider()).collect();
        (expected, returned, store.records().await.len())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn results_follow_registration_order(
        specs in prop::collection::vec((0u64..100, any::<bool>()), 0..=5)
    ) {
        let (expected, returned, logged) = dispatch(&specs);

        prop_assert_eq!(returned.len(), specs.len());
        prop_assert_eq!(&returned, &expected);
        prop_assert_eq!(logged, specs.len());
    }
}
