/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for HTTP client
[POS]:    Integration tests - HTTP endpoints
[UPDATE]: When HTTP endpoints change
*/

mod common;

use common::{client_for, quiz_fixture, setup_mock_server};
use quizmaster_client::{
    AnswerValue, ClientConfig, QuizBackend, QuizClient, QuizError, RemoteTaskState,
    SubmitAnswersRequest, TaskType,
};
use std::sync::Arc;
use tokio_test::assert_ok;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let client = assert_ok!(QuizClient::new());
    assert_eq!(client.base_url().as_str(), "http://127.0.0.1:5000/");
    assert!(client.csrf_token().is_none());
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig::default();
    let _client = assert_ok!(QuizClient::with_config(config));
}

#[test]
fn test_client_rejects_bad_base_url() {
    let err = QuizClient::with_config_and_base_url(ClientConfig::default(), "not a url")
        .expect_err("should fail");
    assert!(matches!(err, QuizError::UrlParse(_)));
}

#[tokio::test]
async fn test_backend_trait_object_round_trip() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/export-analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Analytics export started",
            "task_id": "exp-1"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/task-status/exp-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "task_id": "exp-1",
            "state": "SUCCESS",
            "info": "exports/analytics.csv"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend: Arc<dyn QuizBackend> = Arc::new(client_for(&server));
    let trigger = assert_ok!(backend.trigger_task(TaskType::Analytics).await);
    let task_id = trigger.task_id.expect("task id");
    let status = assert_ok!(backend.task_status(&task_id).await);

    assert_eq!(status.state, Some(RemoteTaskState::Success));
    assert_eq!(status.result_text().as_deref(), Some("exports/analytics.csv"));
}

#[tokio::test]
async fn test_session_cookie_is_forwarded() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/student/quiz/1"))
        .and(header("cookie", "session=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quiz_fixture(10)))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.set_session_cookie("session=abc");
    let details = assert_ok!(client.quiz_details(1).await);

    assert_eq!(details.duration, 10);
    assert_eq!(details.questions[1].options, vec!["Pacific", "Atlantic"]);
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/student/quiz/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .quiz_details(1)
        .await
        .expect_err("should fail");
    assert!(matches!(err, QuizError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_submit_through_backend_trait() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/student/quiz/1/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "score": 66.66,
            "total_marks": 3,
            "scored_marks": 2,
            "attempt_id": 40
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend: Arc<dyn QuizBackend> = Arc::new(client_for(&server));
    let request = SubmitAnswersRequest::from_answers([(11, AnswerValue::Index(1))]);
    let response = assert_ok!(backend.submit_quiz(1, &request).await);

    assert_eq!(response.summary.map(|summary| summary.scored_marks), Some(2));
}

#[tokio::test]
async fn test_logout() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Logged out"
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(client_for(&server).logout().await);
}
