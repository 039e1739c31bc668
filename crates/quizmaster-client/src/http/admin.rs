/*
[INPUT]:  Task types and backend job identifiers
[OUTPUT]: Trigger acknowledgements and job status replies
[POS]:    HTTP layer - admin background job endpoints (require admin session)
[UPDATE]: When adding new job types or changing the status payload
*/

use crate::http::{QuizClient, Result};
use crate::types::{TaskStatusResponse, TaskType, TriggerResponse};
use reqwest::Method;

impl QuizClient {
    /// Start a background job
    ///
    /// GET /api/admin/trigger-report | trigger-backup | export-analytics
    pub async fn trigger_task(&self, task_type: TaskType) -> Result<TriggerResponse> {
        let builder = self.request(Method::GET, task_type.endpoint())?;
        self.send_json(builder).await
    }

    /// Query background job status
    ///
    /// GET /api/task-status/{task_id}
    pub async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse> {
        let builder = self.request_segment(Method::GET, "/api/task-status/", task_id)?;
        self.send_json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, QuizClient, QuizError};
    use crate::types::{RemoteTaskState, TaskType};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> QuizClient {
        QuizClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
            .expect("client init")
    }

    #[tokio::test]
    async fn test_trigger_backup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/trigger-backup"))
            .and(header("X-Requested-With", "XMLHttpRequest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Backup started",
                "task_id": "abc123"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .trigger_task(TaskType::Backup)
            .await
            .expect("trigger_task failed");

        assert_eq!(response.task_id.as_deref(), Some("abc123"));
        assert_eq!(response.message.as_deref(), Some("Backup started"));
    }

    #[tokio::test]
    async fn test_trigger_error_carries_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/trigger-report"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "status": "ERROR",
                "error": "broker unavailable"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .trigger_task(TaskType::Report)
            .await
            .expect_err("should fail");

        match err {
            QuizError::Api { code, message } => {
                assert_eq!(code, 500);
                assert_eq!(message, "broker unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_task_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/task-status/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "task_id": "abc123",
                "state": "STARTED",
                "info": "Task is in progress..."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let status = client_for(&server)
            .task_status("abc123")
            .await
            .expect("task_status failed");

        assert_eq!(status.state, Some(RemoteTaskState::Started));
        assert_eq!(status.result_text().as_deref(), Some("Task is in progress..."));
    }

    #[tokio::test]
    async fn test_task_status_encodes_reserved_characters_in_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/task-status/a%2Fb%3Fc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "state": "PENDING"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let status = client_for(&server)
            .task_status("a/b?c")
            .await
            .expect("task_status failed");

        assert_eq!(status.state, Some(RemoteTaskState::Pending));
    }

    #[tokio::test]
    async fn test_forbidden_status_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/task-status/abc123"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "message": "Admin role required"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .task_status("abc123")
            .await
            .expect_err("should fail");

        assert!(err.is_auth_error());
        assert_eq!(err.server_message(), Some("Admin role required"));
    }
}
