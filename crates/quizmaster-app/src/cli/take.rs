/*
[INPUT]:  AppConfig, quiz id, shutdown token, keyboard input
[OUTPUT]: One timed quiz attempt and its score
[POS]:    CLI quiz page
[UPDATE]: When SessionCommand or SessionExit change
[UPDATE]: 2026-10-19 Progress and markers come from the session snapshot
*/

use anyhow::{Result, bail};
use console::style;
use dialoguer::{Confirm, Select, theme::ColorfulTheme};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use quizmaster_app::results::ScoreBand;
use quizmaster_app::session::quiz::EMPTY_ANSWERS_MESSAGE;
use quizmaster_app::session::{QuestionMarker, answered_count, format_time, question_marker};
use quizmaster_app::{
    AppConfig, QuizSession, SessionCommand, SessionDriver, SessionExit, SessionSnapshot,
    Severity, SubmissionState,
};
use quizmaster_client::{AnswerValue, ScoreSummary};

pub async fn run_take(config: &AppConfig, quiz_id: u64, shutdown: CancellationToken) -> Result<()> {
    let client = Arc::new(config.build_client()?);
    let mut session = QuizSession::new(client, quiz_id, config.session_config());

    tokio::select! {
        biased;
        _ = shutdown.cancelled() => return Ok(()),
        _ = session.load() => {}
    }

    let snapshot = session.snapshot().clone();
    if snapshot.submission_state != SubmissionState::InProgress {
        bail!("{}", snapshot.error.unwrap_or_default());
    }

    println!("{}", style(&snapshot.title).bold().cyan());
    println!(
        "{} questions, time limit {}",
        snapshot.questions.len(),
        format_time(snapshot.duration_seconds)
    );

    let (driver, commands) = SessionDriver::new(session, shutdown);
    let updates = driver.subscribe();
    let runtime = Handle::current();
    // dialoguer blocks on stdin; a detached thread never holds up shutdown
    std::thread::spawn(move || {
        if let Err(err) = prompt_loop(runtime, updates, commands) {
            debug!(error = %err, "quiz prompt stopped");
        }
    });

    match driver.run().await {
        SessionExit::Completed(summary) => {
            print_summary(&summary);
            Ok(())
        }
        SessionExit::Failed(message) => bail!("{message}"),
        SessionExit::Redirect { target } => {
            bail!("not authorized to submit this quiz; continue at {target}")
        }
        SessionExit::Cancelled => {
            println!("\n{}", style("Quiz abandoned.").yellow());
            Ok(())
        }
    }
}

fn prompt_loop(
    runtime: Handle,
    mut updates: watch::Receiver<SessionSnapshot>,
    commands: mpsc::Sender<SessionCommand>,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        let snapshot = updates.borrow_and_update().clone();
        if snapshot.submission_state != SubmissionState::InProgress {
            return Ok(());
        }

        let total = snapshot.questions.len();
        let answered = answered_count(&snapshot);
        let mut items: Vec<String> = snapshot
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let marker = marker_label(question_marker(&snapshot, index));
                format!("{marker} Q{}. {}", index + 1, question.text)
            })
            .collect();
        items.push("Submit quiz".to_string());

        let choice = Select::with_theme(&theme)
            .with_prompt(format!(
                "Time left {} | answered {}/{}",
                format_time(snapshot.remaining_seconds),
                answered,
                total
            ))
            .items(&items)
            .default(snapshot.current_question.min(total))
            .interact()?;

        if choice == total {
            if answered == 0 {
                println!("{}", style(EMPTY_ANSWERS_MESSAGE).red());
                continue;
            }
            let confirmed = Confirm::with_theme(&theme)
                .with_prompt(format!("Submit {answered} of {total} answers?"))
                .default(true)
                .interact()?;
            if confirmed {
                commands.blocking_send(SessionCommand::Submit)?;
                return Ok(());
            }
            continue;
        }

        let question = &snapshot.questions[choice];
        commands.blocking_send(SessionCommand::GoTo(choice))?;
        let picked = Select::with_theme(&theme)
            .with_prompt(&question.text)
            .items(&question.options)
            .default(0)
            .interact_opt()?;
        let Some(option_index) = picked else {
            continue;
        };

        commands.blocking_send(SessionCommand::RecordAnswer {
            question_id: question.id,
            option_index,
        })?;
        let next = if choice + 1 < total {
            commands.blocking_send(SessionCommand::NextQuestion)?;
            choice + 1
        } else {
            choice
        };

        // Redraw only once the driver has applied the answer and the move
        let expected = AnswerValue::Index(option_index);
        let applied = runtime.block_on(updates.wait_for(|current| {
            current.submission_state != SubmissionState::InProgress
                || (current.answers.get(&question.id) == Some(&expected)
                    && current.current_question == next)
        }));
        if applied.map(drop).is_err() {
            return Ok(());
        }
    }
}

fn marker_label(marker: QuestionMarker) -> &'static str {
    match marker {
        QuestionMarker::Current => "[>]",
        QuestionMarker::Answered => "[x]",
        QuestionMarker::Unanswered => "[ ]",
    }
}

fn print_summary(summary: &ScoreSummary) {
    let score = format!("{:.1}%", summary.score);
    let score = match ScoreBand::for_score(summary.score).severity() {
        Severity::Success => style(score).green(),
        Severity::Warning => style(score).yellow(),
        _ => style(score).red(),
    };
    println!("\n{}", style("Quiz submitted").bold().green());
    println!(
        "Score: {} ({}/{} marks)",
        score.bold(),
        summary.scored_marks,
        summary.total_marks
    );
    if let Some(attempt_id) = summary.attempt_id {
        println!("Attempt: {}", style(attempt_id).dim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizmaster_client::Question;

    #[test]
    fn test_navigator_labels_follow_snapshot_answers() {
        let mut snapshot = SessionSnapshot::loading(7);
        snapshot.submission_state = SubmissionState::InProgress;
        snapshot.questions = (1..=3)
            .map(|id| Question {
                id,
                text: format!("Q{id}"),
                options: vec!["a".to_string(), "b".to_string()],
                marks: 1,
            })
            .collect();
        // answer recorded by the session, e.g. through the text path
        snapshot.answers.insert(3, AnswerValue::Text("b".to_string()));

        let labels: Vec<_> = (0..3)
            .map(|index| marker_label(question_marker(&snapshot, index)))
            .collect();
        assert_eq!(labels, vec!["[>]", "[ ]", "[x]"]);
        assert_eq!(answered_count(&snapshot), 1);
    }
}
