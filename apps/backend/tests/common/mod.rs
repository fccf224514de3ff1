//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the router to a seeded dictionary and an in-memory note store
//! - Helpers for driving lookup sessions to a settled state

pub mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_test::TestServer;
use serde_json::Value;

use flashforge_backend::config::Config;
use flashforge_backend::services::dictionary::StaticDictionary;
use flashforge_backend::services::notes::InMemoryNoteStore;
use flashforge_backend::{router, AppState};

/// Test context holding the application state and router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Create a context with the fixture dictionary and default config.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let dictionary = StaticDictionary::from_json(fixtures::DICTIONARY_SEED)
            .expect("fixture dictionary parses");
        let state = AppState::new(
            config,
            Arc::new(dictionary),
            Arc::new(InMemoryNoteStore::new()),
        );
        let app = router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }
}

/// Start a lookup and return its session id.
pub async fn start_lookup(server: &TestServer, word: &str) -> String {
    let response = server
        .post("/api/lookups")
        .json(&fixtures::lookup_request(word))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["session_id"].as_str().unwrap().to_string()
}

/// Poll a session until it leaves the `searching` state.
pub async fn settled_status(server: &TestServer, session_id: &str) -> Value {
    let mut body = Value::Null;
    for _ in 0..200 {
        let response = server.get(&format!("/api/lookups/{}", session_id)).await;
        response.assert_status_ok();
        body = response.json();
        if body["status"] != "searching" {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("lookup {} never settled: {}", session_id, body);
}
