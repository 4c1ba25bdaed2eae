//! Common test utilities for in-process API testing.
//!
//! This module provides a test fixture that builds the real router over an
//! injected ticket store, so every endpoint can be exercised without binding
//! a socket.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use socdesk_core::{testing::MockTicketStore, Config, MemoryTicketStore, TicketStore};
use socdesk_server::{create_router, AppState};

/// Re-export fixtures for test convenience
pub use socdesk_core::testing::fixtures;

/// Test fixture for in-process API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_ticket_creation() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/v1/tickets", json!({
///         "key": "SOC-1",
///         "summary": "SOC Event Alert"
///     })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// The store behind the router, for seeding and inspection
    pub store: Arc<dyn TicketStore>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

/// Config with a fixed generator seed so generated keys are predictable.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.generator.seed = Some(42);
    config
}

impl TestFixture {
    /// Create a new test fixture over an empty in-memory store.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(config: Config) -> Self {
        Self::with_store(config, Arc::new(MemoryTicketStore::new()))
    }

    /// Create a test fixture over a failure-injecting store.
    pub fn with_mock_store() -> (Self, Arc<MockTicketStore>) {
        let store = Arc::new(MockTicketStore::new());
        let fixture = Self::with_store(test_config(), Arc::clone(&store) as Arc<dyn TicketStore>);
        (fixture, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn TicketStore>) -> Self {
        let state = Arc::new(AppState::new(config, Arc::clone(&store)));
        let router = create_router(state);
        Self { router, store }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        match &$response {
            response => assert_eq!(
                response.status, $status,
                "Expected status {:?}, got {:?}. Body: {}",
                $status,
                response.status,
                serde_json::to_string_pretty(&response.body).unwrap_or_default()
            ),
        }
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
