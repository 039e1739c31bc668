/*
[INPUT]:  QuizBackend, quiz id, SessionConfig, answers, one-second ticks
[OUTPUT]: SessionSnapshot transitions Loading -> InProgress -> Submitting -> Completed | Failed
[POS]:    Session layer - timed quiz state machine
[UPDATE]: When changing submission guards, failure messages or redirect handling
[UPDATE]: 2026-10-16 Reject manual submit with no answers; expiry always submits
*/

use quizmaster_client::{AnswerValue, Question, QuizBackend, ScoreSummary};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::encoding::{AnswerEncoding, encode_answers};

pub const LOAD_FAILED_MESSAGE: &str =
    "Failed to load quiz. Please check your connection or try again later.";
pub const NO_QUESTIONS_MESSAGE: &str = "This quiz has no questions";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit quiz. Please try again.";
pub const EMPTY_ANSWERS_MESSAGE: &str = "Please answer at least one question before submitting";
pub const DEFAULT_REDIRECT_TARGET: &str = "/student/quizzes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub answer_encoding: AnswerEncoding,
    pub tick_interval: Duration,
    pub redirect_delay: Duration,
    pub redirect_target: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            answer_encoding: AnswerEncoding::default(),
            tick_interval: Duration::from_secs(1),
            redirect_delay: Duration::from_secs(3),
            redirect_target: DEFAULT_REDIRECT_TARGET.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Loading,
    InProgress,
    Submitting,
    Completed,
    Failed,
}

impl SubmissionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SubmissionState::Completed | SubmissionState::Failed)
    }
}

/// Navigation scheduled after an authorization failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub target: String,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    Manual,
    TimerExpired,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Session was not in progress; nothing sent
    Ignored,
    /// Required-answer check failed; session continues
    Rejected(String),
    Completed(ScoreSummary),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Session is not counting down
    Idle,
    Running { remaining_seconds: u64 },
    Expired(SubmitOutcome),
}

/// Everything the quiz page renders
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub quiz_id: u64,
    pub title: String,
    pub duration_seconds: u64,
    pub remaining_seconds: u64,
    pub questions: Vec<Question>,
    pub answers: BTreeMap<u64, AnswerValue>,
    pub submission_state: SubmissionState,
    pub current_question: usize,
    pub result: Option<ScoreSummary>,
    pub error: Option<String>,
    pub redirect: Option<Redirect>,
    /// Submission requests sent to the backend
    pub submissions: u32,
}

impl SessionSnapshot {
    pub fn loading(quiz_id: u64) -> Self {
        Self {
            quiz_id,
            title: String::new(),
            duration_seconds: 0,
            remaining_seconds: 0,
            questions: Vec::new(),
            answers: BTreeMap::new(),
            submission_state: SubmissionState::Loading,
            current_question: 0,
            result: None,
            error: None,
            redirect: None,
            submissions: 0,
        }
    }
}

/// One student's timed attempt.
///
/// Driven sequentially through `&mut self`; [`super::SessionDriver`] supplies
/// the clock and user commands.
pub struct QuizSession<B: ?Sized> {
    backend: Arc<B>,
    config: SessionConfig,
    state: SessionSnapshot,
    updates: watch::Sender<SessionSnapshot>,
}

impl<B> QuizSession<B>
where
    B: QuizBackend + ?Sized,
{
    pub fn new(backend: Arc<B>, quiz_id: u64, config: SessionConfig) -> Self {
        let state = SessionSnapshot::loading(quiz_id);
        let (updates, _) = watch::channel(state.clone());
        Self {
            backend,
            config,
            state,
            updates,
        }
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.state
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.state.submission_state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.updates.subscribe()
    }

    pub fn pending_redirect(&self) -> Option<&Redirect> {
        self.state.redirect.as_ref()
    }

    /// Fetch quiz content and start the countdown
    pub async fn load(&mut self) {
        if self.state.submission_state != SubmissionState::Loading {
            debug!(quiz_id = self.state.quiz_id, "load ignored; session already loaded");
            return;
        }

        let quiz_id = self.state.quiz_id;
        info!(quiz_id, "loading quiz");
        match self.backend.quiz_details(quiz_id).await {
            Ok(details) if details.questions.is_empty() => {
                warn!(quiz_id, "quiz has no questions");
                self.state.title = details.title;
                self.fail(NO_QUESTIONS_MESSAGE.to_string());
            }
            Ok(details) => {
                let duration_seconds = u64::from(details.duration) * 60;
                info!(
                    quiz_id,
                    questions = details.questions.len(),
                    duration_seconds,
                    "quiz loaded"
                );
                self.state.title = details.title;
                self.state.questions = details.questions;
                self.state.duration_seconds = duration_seconds;
                self.state.remaining_seconds = duration_seconds;
                self.state.error = None;
                self.state.submission_state = SubmissionState::InProgress;
                self.publish();
            }
            Err(err) => {
                warn!(quiz_id, error = %err, "quiz load failed");
                self.fail(LOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Record the option position chosen for a question (last write wins)
    pub fn record_answer(&mut self, question_id: u64, option_index: usize) -> bool {
        let valid = self
            .question(question_id)
            .is_some_and(|question| option_index < question.options.len());
        if !valid {
            debug!(question_id, option_index, "answer for unknown question or option");
            return false;
        }
        self.store_answer(question_id, AnswerValue::Index(option_index))
    }

    /// Record the literal option text chosen for a question (last write wins)
    pub fn record_answer_text(&mut self, question_id: u64, text: impl Into<String>) -> bool {
        if self.question(question_id).is_none() {
            debug!(question_id, "answer for unknown question");
            return false;
        }
        self.store_answer(question_id, AnswerValue::Text(text.into()))
    }

    /// One second of the countdown; expiry submits exactly once
    pub async fn tick(&mut self) -> TickOutcome {
        if self.state.submission_state != SubmissionState::InProgress {
            return TickOutcome::Idle;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        self.publish();

        if self.state.remaining_seconds > 0 {
            return TickOutcome::Running {
                remaining_seconds: self.state.remaining_seconds,
            };
        }

        info!(quiz_id = self.state.quiz_id, "time is up; submitting");
        TickOutcome::Expired(self.submit_with(SubmitTrigger::TimerExpired).await)
    }

    /// Student-initiated submission
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.submit_with(SubmitTrigger::Manual).await
    }

    pub async fn submit_with(&mut self, trigger: SubmitTrigger) -> SubmitOutcome {
        let quiz_id = self.state.quiz_id;
        if self.state.submission_state != SubmissionState::InProgress {
            debug!(
                quiz_id,
                state = ?self.state.submission_state,
                ?trigger,
                "submit ignored"
            );
            return SubmitOutcome::Ignored;
        }

        if trigger == SubmitTrigger::Manual && self.state.answers.is_empty() {
            self.state.error = Some(EMPTY_ANSWERS_MESSAGE.to_string());
            self.publish();
            return SubmitOutcome::Rejected(EMPTY_ANSWERS_MESSAGE.to_string());
        }

        self.state.submission_state = SubmissionState::Submitting;
        self.state.error = None;
        self.state.submissions += 1;
        self.publish();

        let request = encode_answers(
            self.config.answer_encoding,
            &self.state.questions,
            &self.state.answers,
        );
        info!(quiz_id, answers = request.answers.len(), ?trigger, "submitting quiz");

        match self.backend.submit_quiz(quiz_id, &request).await {
            Ok(response) => match response.summary {
                Some(summary) => {
                    info!(
                        quiz_id,
                        score = summary.score,
                        scored_marks = summary.scored_marks,
                        total_marks = summary.total_marks,
                        "quiz submitted"
                    );
                    self.state.result = Some(summary.clone());
                    self.state.submission_state = SubmissionState::Completed;
                    self.publish();
                    SubmitOutcome::Completed(summary)
                }
                None => {
                    warn!(quiz_id, "submission reply has no score");
                    let message = response
                        .error
                        .unwrap_or_else(|| SUBMIT_FAILED_MESSAGE.to_string());
                    self.fail(message.clone());
                    SubmitOutcome::Failed(message)
                }
            },
            Err(err) => {
                warn!(quiz_id, error = %err, "quiz submission failed");
                let message = err
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| SUBMIT_FAILED_MESSAGE.to_string());
                if err.is_auth_error() {
                    info!(
                        quiz_id,
                        redirect_to = %self.config.redirect_target,
                        "scheduling redirect after authorization failure"
                    );
                    self.state.redirect = Some(Redirect {
                        target: self.config.redirect_target.clone(),
                        delay: self.config.redirect_delay,
                    });
                }
                self.fail(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    pub fn next_question(&mut self) {
        if self.state.current_question + 1 < self.state.questions.len() {
            self.state.current_question += 1;
            self.publish();
        }
    }

    pub fn previous_question(&mut self) {
        if self.state.current_question > 0 {
            self.state.current_question -= 1;
            self.publish();
        }
    }

    pub fn go_to(&mut self, index: usize) {
        if index < self.state.questions.len() {
            self.state.current_question = index;
            self.publish();
        }
    }

    fn question(&self, question_id: u64) -> Option<&Question> {
        self.state
            .questions
            .iter()
            .find(|question| question.id == question_id)
    }

    fn store_answer(&mut self, question_id: u64, value: AnswerValue) -> bool {
        if self.state.submission_state != SubmissionState::InProgress {
            debug!(question_id, "answer ignored; session not in progress");
            return false;
        }
        self.state.answers.insert(question_id, value);
        self.state.error = None;
        self.publish();
        true
    }

    fn fail(&mut self, message: String) {
        self.state.submission_state = SubmissionState::Failed;
        self.state.error = Some(message);
        self.publish();
    }

    fn publish(&self) {
        self.updates.send_replace(self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(SubmissionState::Completed.is_terminal());
        assert!(SubmissionState::Failed.is_terminal());
        assert!(!SubmissionState::Submitting.is_terminal());
        assert!(!SubmissionState::Loading.is_terminal());
    }

    #[test]
    fn test_default_session_config() {
        let config = SessionConfig::default();
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.redirect_delay, Duration::from_secs(3));
        assert_eq!(config.redirect_target, "/student/quizzes");
        assert_eq!(config.answer_encoding, AnswerEncoding::OptionIndex);
    }

    #[test]
    fn test_loading_snapshot() {
        let snapshot = SessionSnapshot::loading(5);
        assert_eq!(snapshot.quiz_id, 5);
        assert_eq!(snapshot.submission_state, SubmissionState::Loading);
        assert!(snapshot.answers.is_empty());
    }
}
