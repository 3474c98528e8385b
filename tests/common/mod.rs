#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::net::TcpListener;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lostfound::config::Config;
use lostfound::server::{AppState, create_router};
use lostfound::shopify::ShopifyClient;
use lostfound::workflow::StatusWorkflow;

pub const TEST_TOKEN: &str = "shpat_test_token";
pub const GRAPHQL_PATH: &str = "/admin/api/2023-10/graphql.json";
pub const PET_REFERENCE: &str = "gid://shopify/Metaobject/1";

/// A running lostfound server wired to a fake Shopify store
pub struct LostFoundTest {
    pub store: MockServer,
    pub base_url: String,
    client: reqwest::Client,
}

impl LostFoundTest {
    pub async fn new() -> Self {
        Self::with_timeout(5).await
    }

    /// Start with a custom total deadline for store calls
    pub async fn with_timeout(timeout_secs: u64) -> Self {
        let store = MockServer::start().await;

        let mut config = Config::default();
        config.store.access_token = Some(TEST_TOKEN.to_string());
        config.store.endpoint = Some(format!("{}{}", store.uri(), GRAPHQL_PATH));
        config.store.timeout_secs = timeout_secs;
        config.store.connect_timeout_secs = 5;

        let client = Arc::new(ShopifyClient::from_config(&config).expect("valid test config"));
        let workflow = StatusWorkflow::new(client, config.store.metaobject_type.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener address");
        let router = create_router(AppState::new(workflow));
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("server error");
        });

        LostFoundTest {
            store,
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
        }
    }

    /// GET a path on the service, returning status code and body
    pub async fn get(&self, path_and_query: &str) -> (u16, String) {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path_and_query))
            .send()
            .await
            .expect("request failed");
        let status = response.status().as_u16();
        let body = response.text().await.expect("body");
        (status, body)
    }

    /// Stub the handle lookup; `reference` of `None` means no such pet.
    pub async fn stub_resolve(&self, handle: &str, reference: Option<&str>, expected_calls: u64) {
        let metaobject = reference.map(|id| json!({ "id": id, "handle": handle }));
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(header("x-shopify-access-token", TEST_TOKEN))
            .and(body_string_contains("metaobjectByHandle"))
            .and(body_partial_json(json!({
                "variables": { "handle": { "type": "pet", "handle": handle } }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "metaobjectByHandle": metaobject } })),
            )
            .expect(expected_calls)
            .mount(&self.store)
            .await;
    }

    /// Stub the handle lookup with an arbitrary response
    pub async fn stub_resolve_response(&self, response: ResponseTemplate, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(body_string_contains("metaobjectByHandle"))
            .respond_with(response)
            .expect(expected_calls)
            .mount(&self.store)
            .await;
    }

    /// Stub the update mutation with an arbitrary response
    pub async fn stub_update(&self, response: ResponseTemplate, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(header("x-shopify-access-token", TEST_TOKEN))
            .and(body_string_contains("metaobjectUpdate"))
            .respond_with(response)
            .expect(expected_calls)
            .mount(&self.store)
            .await;
    }

    /// All requests the fake store has seen, as JSON bodies
    pub async fn store_requests(&self) -> Vec<Value> {
        self.store
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| r.body_json::<Value>().expect("store request body is JSON"))
            .collect()
    }

    /// Variables of every update mutation the store received
    pub async fn update_variables(&self) -> Vec<Value> {
        self.store_requests()
            .await
            .into_iter()
            .filter(|body| {
                body["query"]
                    .as_str()
                    .is_some_and(|q| q.contains("metaobjectUpdate"))
            })
            .map(|body| body["variables"].clone())
            .collect()
    }
}

/// A successful `metaobjectUpdate` echoing back the given fields
pub fn update_success(fields: &[(&str, &str)]) -> ResponseTemplate {
    let mut all_fields = vec![json!({ "key": "name", "value": "Fluffy" })];
    all_fields.extend(
        fields
            .iter()
            .map(|(key, value)| json!({ "key": key, "value": value })),
    );
    ResponseTemplate::new(200).set_body_json(json!({
        "data": {
            "metaobjectUpdate": {
                "metaobject": { "id": PET_REFERENCE, "fields": all_fields },
                "userErrors": []
            }
        }
    }))
}

/// A `metaobjectUpdate` rejected with one field-level user error
pub fn update_user_error(field: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": {
            "metaobjectUpdate": {
                "metaobject": null,
                "userErrors": [ { "field": ["fields", field], "message": message } ]
            }
        }
    }))
}
