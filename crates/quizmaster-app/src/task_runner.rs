/*
[INPUT]:  Task type chosen by an administrator, QuizBackend, CancellationToken
[OUTPUT]: Task state published on a watch channel until Success or Failure
[POS]:    Execution layer - background job trigger and status polling
[UPDATE]: When changing poll cadence, terminal mapping, or status messages
[UPDATE]: 2026-10-15 Bound polling by max_attempts; stop pending polls on shutdown
[UPDATE]: 2026-10-19 Status requests are issued only by the run loop
*/

use quizmaster_client::{QuizBackend, RemoteTaskState, TaskType};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::notice::Severity;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 900;

/// Poll cadence and bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    /// `None` polls until the backend reports a terminal state
    pub max_attempts: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: Some(DEFAULT_MAX_POLL_ATTEMPTS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskState {
    #[default]
    NotStarted,
    Pending,
    Started,
    Success,
    Failure,
}

impl TaskState {
    pub fn is_in_flight(self) -> bool {
        matches!(self, TaskState::Pending | TaskState::Started)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Success | TaskState::Failure)
    }
}

/// One backend job invocation as seen by the dashboard
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Task {
    pub task_type: Option<TaskType>,
    pub task_id: Option<String>,
    pub state: TaskState,
    pub status_message: String,
    pub error_detail: Option<String>,
    pub severity: Severity,
    /// Status requests issued for this task
    pub polls: u32,
}

impl Task {
    fn pending(task_type: TaskType) -> Self {
        Self {
            task_type: Some(task_type),
            task_id: None,
            state: TaskState::Pending,
            status_message: "Starting task...".to_string(),
            error_detail: None,
            severity: Severity::Info,
            polls: 0,
        }
    }

    fn display_name(&self) -> &'static str {
        self.task_type.map(TaskType::display_name).unwrap_or("Task")
    }
}

/// Result of a single status request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollOutcome {
    Continue,
    Terminal,
}

struct Shared<B: ?Sized> {
    backend: Arc<B>,
    config: PollConfig,
    state: watch::Sender<Task>,
    shutdown: CancellationToken,
}

/// Triggers named backend jobs and follows them to completion.
///
/// At most one task is in flight; `trigger` while Pending/Started is a no-op.
/// Status requests come only from the loop spawned by `trigger`, one at a
/// time and `interval` apart.
pub struct TaskRunner<B: ?Sized> {
    shared: Arc<Shared<B>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl<B> TaskRunner<B>
where
    B: QuizBackend + ?Sized + 'static,
{
    pub fn new(backend: Arc<B>, config: PollConfig) -> Self {
        let (state, _) = watch::channel(Task::default());
        Self {
            shared: Arc::new(Shared {
                backend,
                config,
                state,
                shutdown: CancellationToken::new(),
            }),
            handle: Mutex::new(None),
        }
    }

    /// Start a job unless one is already in flight.
    ///
    /// Returns `false` (and issues no request) when rejected.
    pub fn trigger(&self, task_type: TaskType) -> bool {
        if self.shared.shutdown.is_cancelled() {
            debug!(task_type = %task_type, "trigger ignored after shutdown");
            return false;
        }

        let claimed = self.shared.state.send_if_modified(|task| {
            if task.state.is_in_flight() {
                return false;
            }
            *task = Task::pending(task_type);
            true
        });

        if !claimed {
            debug!(task_type = %task_type, "trigger ignored; task already in flight");
            return false;
        }

        let shared = self.shared.clone();
        let handle = tokio::spawn(async move { shared.run(task_type).await });
        let mut guard = self.handle.lock().unwrap_or_else(|err| err.into_inner());
        *guard = Some(handle);
        true
    }

    pub fn snapshot(&self) -> Task {
        self.shared.state.borrow().clone()
    }

    /// Receiver notified on every task transition
    pub fn subscribe(&self) -> watch::Receiver<Task> {
        self.shared.state.subscribe()
    }

    pub fn is_in_flight(&self) -> bool {
        self.shared.state.borrow().state.is_in_flight()
    }

    /// Cancel any pending poll. State is left as it was.
    pub fn shutdown(&self) {
        self.shared.shutdown.cancel();
    }

    /// Wait for the current trigger/poll run to finish
    pub async fn wait(&self) -> Task {
        let handle = {
            let mut guard = self.handle.lock().unwrap_or_else(|err| err.into_inner());
            guard.take()
        };
        if let Some(handle) = handle
            && let Err(err) = handle.await
        {
            warn!(error = %err, "task runner join failed");
        }
        self.snapshot()
    }
}

impl<B> Drop for TaskRunner<B>
where
    B: ?Sized,
{
    fn drop(&mut self) {
        self.shared.shutdown.cancel();
    }
}

impl<B> Shared<B>
where
    B: QuizBackend + ?Sized,
{
    async fn run(&self, task_type: TaskType) {
        let name = task_type.display_name();
        info!(task_type = %task_type, endpoint = task_type.endpoint(), "triggering task");

        let trigger = tokio::select! {
            _ = self.shutdown.cancelled() => {
                info!(task_type = %task_type, "task trigger cancelled");
                return;
            }
            response = self.backend.trigger_task(task_type) => response,
        };

        let task_id = match trigger {
            Ok(response) => match response.task_id.filter(|id| !id.is_empty()) {
                Some(task_id) => task_id,
                None => {
                    self.fail(format!("No task ID received from {name}"));
                    return;
                }
            },
            Err(err) => {
                warn!(task_type = %task_type, error = %err, "task trigger failed");
                let message = err
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                self.fail(message);
                return;
            }
        };

        info!(task_type = %task_type, task_id = %task_id, "task started");
        self.state.send_modify(|task| {
            task.task_id = Some(task_id.clone());
            task.status_message = format!("{name} task started...");
        });

        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            let outcome = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    info!(task_id = %task_id, "task polling cancelled");
                    return;
                }
                outcome = self.poll(&task_id) => outcome,
            };

            if outcome == PollOutcome::Terminal {
                return;
            }

            if let Some(max_attempts) = self.config.max_attempts
                && attempts >= max_attempts
            {
                warn!(task_id = %task_id, attempts, "task polling gave up");
                self.fail(format!(
                    "{name}: timed out waiting for completion after {attempts} status checks"
                ));
                return;
            }

            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    info!(task_id = %task_id, "task polling cancelled");
                    return;
                }
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }
    }

    async fn poll(&self, task_id: &str) -> PollOutcome {
        let (name, in_flight) = {
            let task = self.state.borrow();
            (task.display_name(), task.state.is_in_flight())
        };
        if !in_flight {
            debug!(task_id, "poll ignored; no task in flight");
            return PollOutcome::Terminal;
        }

        self.state.send_modify(|task| task.polls += 1);
        let status = match self.backend.task_status(task_id).await {
            Ok(status) => status,
            Err(err) => {
                warn!(task_id, error = %err, "task status request failed");
                let detail = err
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                self.fail(format!("{name}: {detail}"));
                return PollOutcome::Terminal;
            }
        };

        let Some(state) = status.state.clone() else {
            warn!(task_id, "task status response missing state");
            self.fail(format!("{name}: Invalid status response"));
            return PollOutcome::Terminal;
        };

        debug!(task_id, state = state.as_str(), "task status");
        match state {
            RemoteTaskState::Success => {
                info!(task_id, "task completed");
                self.state.send_modify(|task| {
                    task.state = TaskState::Success;
                    task.status_message = format!("{name} completed successfully!");
                    task.error_detail = None;
                    task.severity = Severity::Success;
                });
                PollOutcome::Terminal
            }
            RemoteTaskState::Failure => {
                let detail = status
                    .result_text()
                    .unwrap_or_else(|| format!("{name} failed"));
                warn!(task_id, detail = %detail, "task failed");
                self.fail(format!("{name}: {detail}"));
                PollOutcome::Terminal
            }
            RemoteTaskState::Pending => {
                self.progress(TaskState::Pending, format!("{name} is pending..."));
                PollOutcome::Continue
            }
            RemoteTaskState::Started => {
                self.progress(TaskState::Started, format!("{name} is in progress..."));
                PollOutcome::Continue
            }
            RemoteTaskState::Other(raw) => {
                self.state.send_modify(|task| {
                    task.status_message = format!("{name} status: {raw}");
                    task.severity = Severity::Info;
                });
                PollOutcome::Continue
            }
        }
    }

    fn progress(&self, state: TaskState, message: String) {
        self.state.send_modify(|task| {
            task.state = state;
            task.status_message = message;
            task.severity = Severity::Info;
        });
    }

    fn fail(&self, message: String) {
        self.state.send_modify(|task| {
            task.state = TaskState::Failure;
            task.status_message = format!("Error: {message}");
            task.error_detail = Some(message);
            task.severity = Severity::Danger;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quizmaster_client::{
        QuizDetails, QuizError, Result, SubmitAnswersRequest, SubmitResponse,
        TaskStatusResponse, TriggerResponse,
    };
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_task_state_classification() {
        assert!(TaskState::Pending.is_in_flight());
        assert!(TaskState::Started.is_in_flight());
        assert!(!TaskState::NotStarted.is_in_flight());
        assert!(TaskState::Success.is_terminal());
        assert!(TaskState::Failure.is_terminal());
        assert!(!TaskState::Started.is_terminal());
    }

    #[test]
    fn test_pending_task_defaults() {
        let task = Task::pending(TaskType::Report);
        assert_eq!(task.state, TaskState::Pending);
        assert_eq!(task.status_message, "Starting task...");
        assert_eq!(task.display_name(), "Monthly Report");
        assert_eq!(Task::default().display_name(), "Task");
    }

    #[test]
    fn test_default_poll_config() {
        let config = PollConfig::default();
        assert_eq!(config.interval, Duration::from_secs(2));
        assert_eq!(config.max_attempts, Some(900));
    }

    /// Counts status requests; every other call is unexpected
    #[derive(Default)]
    struct CountingBackend {
        status_calls: AtomicU32,
    }

    #[async_trait]
    impl QuizBackend for CountingBackend {
        async fn trigger_task(&self, _task_type: TaskType) -> Result<TriggerResponse> {
            Err(QuizError::InvalidResponse("trigger not scripted".into()))
        }

        async fn task_status(&self, _task_id: &str) -> Result<TaskStatusResponse> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            Ok(TaskStatusResponse::default())
        }

        async fn quiz_details(&self, _quiz_id: u64) -> Result<QuizDetails> {
            Err(QuizError::InvalidResponse("quiz not scripted".into()))
        }

        async fn submit_quiz(
            &self,
            _quiz_id: u64,
            _request: &SubmitAnswersRequest,
        ) -> Result<SubmitResponse> {
            Err(QuizError::InvalidResponse("submit not scripted".into()))
        }
    }

    #[tokio::test]
    async fn test_poll_without_task_in_flight_is_noop() {
        let backend = Arc::new(CountingBackend::default());
        let runner = TaskRunner::new(backend.clone(), PollConfig::default());

        assert_eq!(runner.shared.poll("ghost").await, PollOutcome::Terminal);
        assert_eq!(backend.status_calls.load(Ordering::SeqCst), 0);
        assert_eq!(runner.snapshot().state, TaskState::NotStarted);
        assert_eq!(runner.snapshot().polls, 0);
    }
}
