/*
[INPUT]:  Job and quiz requests issued by the client-side state machines
[OUTPUT]: Backend replies through an injectable seam
[POS]:    Backend abstraction - lets state machines run against HTTP or test doubles
[UPDATE]: When the task runner or quiz session needs a new backend call
*/

use async_trait::async_trait;

use crate::http::{QuizClient, Result};
use crate::types::{
    QuizDetails, SubmitAnswersRequest, SubmitResponse, TaskStatusResponse, TaskType,
    TriggerResponse,
};

/// Backend operations the task runner and quiz session depend on
///
/// Implemented by [`QuizClient`]; tests provide scripted implementations.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    async fn trigger_task(&self, task_type: TaskType) -> Result<TriggerResponse>;

    async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse>;

    async fn quiz_details(&self, quiz_id: u64) -> Result<QuizDetails>;

    async fn submit_quiz(
        &self,
        quiz_id: u64,
        request: &SubmitAnswersRequest,
    ) -> Result<SubmitResponse>;
}

#[async_trait]
impl QuizBackend for QuizClient {
    async fn trigger_task(&self, task_type: TaskType) -> Result<TriggerResponse> {
        QuizClient::trigger_task(self, task_type).await
    }

    async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse> {
        QuizClient::task_status(self, task_id).await
    }

    async fn quiz_details(&self, quiz_id: u64) -> Result<QuizDetails> {
        QuizClient::quiz_details(self, quiz_id).await
    }

    async fn submit_quiz(
        &self,
        quiz_id: u64,
        request: &SubmitAnswersRequest,
    ) -> Result<SubmitResponse> {
        QuizClient::submit_quiz(self, quiz_id, request).await
    }
}
