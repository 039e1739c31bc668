/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for quizmaster-client tests

use quizmaster_client::{ClientConfig, QuizClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> QuizClient {
    QuizClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// Quiz payload in the shape the backend serves it
#[allow(dead_code)]
pub fn quiz_fixture(duration_minutes: u32) -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "title": "Geography",
        "duration": duration_minutes,
        "start_time": "2026-10-01T08:00:00",
        "end_time": "2026-10-31T20:00:00",
        "questions": [
            { "id": 11, "text": "Capital of France?", "options": ["Berlin", "Paris"], "marks": 2 },
            { "id": 12, "text": "Largest ocean?", "options": ["Pacific", "Atlantic"], "marks": 1 }
        ]
    })
}
