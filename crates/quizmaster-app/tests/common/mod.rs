/*
[INPUT]:  Scripted backend replies for task and quiz scenarios
[OUTPUT]: Shared QuizBackend test double and fixtures
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When QuizBackend gains an operation or fixtures change
*/

//! Common test utilities for quizmaster-app tests

#![allow(dead_code)]

use async_trait::async_trait;
use quizmaster_client::{
    Question, QuizBackend, QuizDetails, QuizError, RemoteTaskState, Result, ScoreSummary,
    SubmitAnswersRequest, SubmitResponse, TaskStatusResponse, TaskType, TriggerResponse,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Backend double replaying queued replies and counting calls.
///
/// An exhausted status queue keeps answering `PENDING`; an exhausted submit
/// queue answers with [`score`]`(100.0)`.
#[derive(Default)]
pub struct ScriptedBackend {
    triggers: Mutex<VecDeque<Result<TriggerResponse>>>,
    statuses: Mutex<VecDeque<Result<TaskStatusResponse>>>,
    quizzes: Mutex<VecDeque<Result<QuizDetails>>>,
    submits: Mutex<VecDeque<Result<SubmitResponse>>>,
    submitted: Mutex<Vec<SubmitAnswersRequest>>,
    trigger_delay: Option<Duration>,
    trigger_calls: AtomicUsize,
    status_calls: AtomicUsize,
    submit_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every trigger request take `delay` of (virtual) time
    pub fn with_trigger_delay(mut self, delay: Duration) -> Self {
        self.trigger_delay = Some(delay);
        self
    }

    pub fn push_trigger(&self, reply: Result<TriggerResponse>) -> &Self {
        self.triggers.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_status(&self, reply: Result<TaskStatusResponse>) -> &Self {
        self.statuses.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_quiz(&self, reply: Result<QuizDetails>) -> &Self {
        self.quizzes.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_submit(&self, reply: Result<SubmitResponse>) -> &Self {
        self.submits.lock().unwrap().push_back(reply);
        self
    }

    pub fn trigger_calls(&self) -> usize {
        self.trigger_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<SubmitAnswersRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuizBackend for ScriptedBackend {
    async fn trigger_task(&self, task_type: TaskType) -> Result<TriggerResponse> {
        self.trigger_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.trigger_delay {
            tokio::time::sleep(delay).await;
        }
        self.triggers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(trigger_ok(&format!("{}-job", task_type.as_str()))))
    }

    async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(status(task_id, RemoteTaskState::Pending)))
    }

    async fn quiz_details(&self, _quiz_id: u64) -> Result<QuizDetails> {
        self.quizzes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(QuizError::InvalidResponse("no quiz scripted".to_string())))
    }

    async fn submit_quiz(
        &self,
        _quiz_id: u64,
        request: &SubmitAnswersRequest,
    ) -> Result<SubmitResponse> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(request.clone());
        self.submits
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(scored(100.0)))
    }
}

pub fn trigger_ok(task_id: &str) -> TriggerResponse {
    TriggerResponse {
        task_id: Some(task_id.to_string()),
        message: Some("Task started".to_string()),
        error: None,
    }
}

pub fn status(task_id: &str, state: RemoteTaskState) -> TaskStatusResponse {
    TaskStatusResponse {
        task_id: Some(task_id.to_string()),
        state: Some(state),
        result: None,
        info: None,
    }
}

/// Two-question quiz lasting `duration_minutes`
pub fn quiz(duration_minutes: u32) -> QuizDetails {
    QuizDetails {
        id: Some(7),
        title: "Geography".to_string(),
        duration: duration_minutes,
        start_time: None,
        end_time: None,
        questions: vec![
            Question {
                id: 11,
                text: "Capital of France?".to_string(),
                options: vec!["Berlin".to_string(), "Paris".to_string()],
                marks: 2,
            },
            Question {
                id: 12,
                text: "Largest ocean?".to_string(),
                options: vec!["Pacific".to_string(), "Atlantic".to_string()],
                marks: 1,
            },
        ],
    }
}

pub fn scored(score: f64) -> SubmitResponse {
    SubmitResponse {
        summary: Some(ScoreSummary {
            score,
            total_marks: 3,
            scored_marks: 3,
            attempt_id: Some(42),
        }),
        error: None,
        questions: Vec::new(),
    }
}

pub fn forbidden(message: &str) -> QuizError {
    QuizError::Forbidden {
        message: message.to_string(),
    }
}
