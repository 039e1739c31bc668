/*
[INPUT]:  QuizSession, SessionCommand channel, CancellationToken
[OUTPUT]: SessionExit once the attempt is completed, failed, redirected or torn down
[POS]:    Session layer - countdown clock and command loop
[UPDATE]: When changing tick scheduling, teardown, or redirect timing
*/

use quizmaster_client::{QuizBackend, ScoreSummary};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::quiz::{QuizSession, SessionSnapshot, SubmissionState, SubmitOutcome};

const COMMAND_BUFFER: usize = 32;
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// User input forwarded to a running session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    RecordAnswer { question_id: u64, option_index: usize },
    RecordAnswerText { question_id: u64, text: String },
    Submit,
    NextQuestion,
    PreviousQuestion,
    GoTo(usize),
}

/// How a driven session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionExit {
    Completed(ScoreSummary),
    Failed(String),
    /// Authorization failure; caller should navigate to `target`
    Redirect { target: String },
    /// Torn down before reaching a terminal state
    Cancelled,
}

pub struct SessionDriver<B: ?Sized> {
    session: QuizSession<B>,
    commands: mpsc::Receiver<SessionCommand>,
    shutdown: CancellationToken,
}

impl<B> SessionDriver<B>
where
    B: QuizBackend + ?Sized,
{
    pub fn new(
        session: QuizSession<B>,
        shutdown: CancellationToken,
    ) -> (Self, mpsc::Sender<SessionCommand>) {
        let (tx, commands) = mpsc::channel(COMMAND_BUFFER);
        (
            Self {
                session,
                commands,
                shutdown,
            },
            tx,
        )
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.session.subscribe()
    }

    /// Load (if needed), count down, and apply commands until terminal
    pub async fn run(mut self) -> SessionExit {
        if self.session.submission_state() == SubmissionState::Loading {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => return SessionExit::Cancelled,
                _ = self.session.load() => {}
            }
        }

        // interval_at panics on a zero period
        let period = self.session.config().tick_interval.max(MIN_TICK_INTERVAL);
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut commands_open = true;

        while self.session.submission_state() == SubmissionState::InProgress {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    info!(quiz_id = self.session.snapshot().quiz_id, "quiz session torn down");
                    return SessionExit::Cancelled;
                }
                _ = ticker.tick() => {
                    self.session.tick().await;
                }
                command = self.commands.recv(), if commands_open => match command {
                    Some(command) => self.apply(command).await,
                    None => {
                        debug!("command channel closed; countdown continues");
                        commands_open = false;
                    }
                },
            }
        }

        self.finish().await
    }

    async fn apply(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::RecordAnswer {
                question_id,
                option_index,
            } => {
                self.session.record_answer(question_id, option_index);
            }
            SessionCommand::RecordAnswerText { question_id, text } => {
                self.session.record_answer_text(question_id, text);
            }
            SessionCommand::Submit => {
                if let SubmitOutcome::Rejected(reason) = self.session.submit().await {
                    debug!(reason = %reason, "manual submit rejected");
                }
            }
            SessionCommand::NextQuestion => self.session.next_question(),
            SessionCommand::PreviousQuestion => self.session.previous_question(),
            SessionCommand::GoTo(index) => self.session.go_to(index),
        }
    }

    async fn finish(&mut self) -> SessionExit {
        let snapshot = self.session.snapshot().clone();
        match snapshot.submission_state {
            SubmissionState::Completed => match snapshot.result {
                Some(summary) => SessionExit::Completed(summary),
                None => SessionExit::Failed("Submission finished without a score".to_string()),
            },
            _ => {
                if let Some(redirect) = snapshot.redirect {
                    tokio::select! {
                        biased;
                        _ = self.shutdown.cancelled() => return SessionExit::Cancelled,
                        _ = tokio::time::sleep(redirect.delay) => {}
                    }
                    info!(redirect_to = %redirect.target, "redirecting after authorization failure");
                    return SessionExit::Redirect {
                        target: redirect.target,
                    };
                }
                SessionExit::Failed(snapshot.error.unwrap_or_default())
            }
        }
    }
}
