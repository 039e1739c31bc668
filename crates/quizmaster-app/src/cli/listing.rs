/*
[INPUT]:  AppConfig, catalog filters, results search
[OUTPUT]: Quiz catalog, attempt history and dashboard figures printed as tables
[POS]:    CLI student catalog, results and dashboard pages
[UPDATE]: When catalog filters or result columns change
*/

use anyhow::{Context, Result};
use console::style;

use quizmaster_app::results::ScoreBand;
use quizmaster_app::{AppConfig, NoticeBoard, QuizFilter, ResultsView, Severity};
use quizmaster_client::{Attempt, QuizClient, ResponseSheetEntry};

pub async fn run_quizzes(
    config: &AppConfig,
    subject: Option<u64>,
    chapter: Option<u64>,
    search: String,
) -> Result<()> {
    let client = config.build_client()?;
    let mut notices = NoticeBoard::new(config.notice_ttl());
    let mut filter = QuizFilter {
        subject_id: subject,
        chapter_id: chapter,
        search,
    };

    let quizzes = client
        .available_quizzes()
        .await
        .context("Failed to load quizzes")?;

    match client.subjects().await {
        Ok(subjects) => {
            if let Some(subject) = filter
                .subject_id
                .and_then(|id| subjects.iter().find(|subject| subject.id == id))
            {
                println!("Subject: {}", style(&subject.name).bold());
            }
        }
        Err(err) => notices.post_transient(
            format!("Failed to load subjects: {}", message_of(&err)),
            Severity::Warning,
        ),
    }

    if let Some(subject_id) = filter.subject_id {
        match client.chapters(subject_id).await {
            Ok(chapters) => {
                filter.reconcile_chapter(&chapters);
                let names: Vec<&str> = filter
                    .chapters_for(&chapters)
                    .into_iter()
                    .map(|chapter| chapter.name.as_str())
                    .collect();
                if !names.is_empty() {
                    println!("Chapters: {}", style(names.join(", ")).dim());
                }
            }
            Err(err) => notices.post_transient(
                format!("Failed to load chapters: {}", message_of(&err)),
                Severity::Warning,
            ),
        }
    }

    let visible = filter.apply(&quizzes);
    if visible.is_empty() {
        let message = if filter.has_active_filters() {
            "No quizzes match the current filters"
        } else {
            "No quizzes available right now"
        };
        notices.post_persistent(message, Severity::Info);
    }

    for quiz in visible {
        let remaining = quiz
            .remaining_time
            .map(|minutes| format!("closes in {minutes} min"))
            .unwrap_or_default();
        println!(
            "{:>5}  {}  {}  {} min, {} questions  {}",
            style(quiz.id).bold(),
            quiz.title,
            style(format!("{} / {}", quiz.subject_name, quiz.chapter_name)).dim(),
            quiz.duration,
            quiz.questions_count,
            style(remaining).yellow()
        );
    }

    print_notice(&mut notices);
    Ok(())
}

pub async fn run_results(config: &AppConfig, search: &str, attempt: Option<u64>) -> Result<()> {
    let client = config.build_client()?;

    if let Some(attempt_id) = attempt {
        return print_attempt_detail(&client, attempt_id).await;
    }

    let view = ResultsView::from_response(
        client
            .attempts()
            .await
            .context("Failed to load results")?,
    );

    println!(
        "Average {:.1}%  |  Attempts {}  |  Pass rate {:.1}%",
        view.stats.average_score, view.stats.total_attempts, view.stats.pass_rate
    );

    let rows = view.filtered(search);
    if rows.is_empty() {
        println!("{}", style("No attempts found").dim());
    }
    for attempt in rows {
        print_attempt_row(attempt);
    }
    Ok(())
}

pub async fn run_stats(config: &AppConfig) -> Result<()> {
    let client = config.build_client()?;
    let stats = client
        .student_stats()
        .await
        .context("Failed to load dashboard")?;

    println!(
        "Attempts {}  |  Average {}",
        stats.total_attempts,
        styled_score(stats.average_score)
    );

    if !stats.recent_performance.is_empty() {
        println!("
{}", style("Recent quizzes").bold());
    }
    for recent in &stats.recent_performance {
        println!(
            "{}  {}  {}",
            style(&recent.date).dim(),
            recent.quiz_title,
            styled_score(recent.score)
        );
    }

    if !stats.subject_performance.is_empty() {
        println!("
{}", style("By subject").bold());
    }
    for subject in &stats.subject_performance {
        println!(
            "{}  {} attempts  avg {}",
            subject.subject,
            subject.attempts,
            styled_score(subject.avg_score)
        );
    }
    Ok(())
}

async fn print_attempt_detail(client: &QuizClient, attempt_id: u64) -> Result<()> {
    let detail = client
        .attempt_detail(attempt_id)
        .await
        .with_context(|| format!("Failed to load attempt {attempt_id}"))?;

    println!("{}", style(&detail.quiz_title).bold().cyan());
    println!(
        "{} / {}  score {}  ({}/{} correct)",
        detail.subject_name,
        detail.chapter_name,
        styled_score(detail.score),
        detail.correct_answers,
        detail.total_questions
    );
    for (index, entry) in detail.response_sheet.iter().enumerate() {
        print_sheet_entry(index, entry);
    }
    Ok(())
}

fn print_attempt_row(attempt: &Attempt) {
    let date = attempt
        .date
        .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    println!(
        "{:>5}  {}  {}  {}  {}",
        style(attempt.id).bold(),
        attempt.quiz_title,
        style(&attempt.subject_name).dim(),
        styled_score(attempt.score),
        style(date).dim()
    );
}

fn print_sheet_entry(index: usize, entry: &ResponseSheetEntry) {
    let mark = if entry.is_correct {
        style("correct").green()
    } else {
        style("wrong").red()
    };
    println!("\nQ{}. {} [{}]", index + 1, entry.question_text, mark);
    println!(
        "   your answer: {}   correct: {}   marks {}/{}",
        entry.user_answer.as_deref().unwrap_or("-"),
        entry.correct_answer.as_deref().unwrap_or("-"),
        entry.scored_marks,
        entry.marks
    );
}

pub(crate) fn styled_score(score: f64) -> console::StyledObject<String> {
    let text = format!("{score:.1}%");
    match ScoreBand::for_score(score).severity() {
        Severity::Success => style(text).green(),
        Severity::Warning => style(text).yellow(),
        _ => style(text).red(),
    }
}

pub(crate) fn print_notice(notices: &mut NoticeBoard) {
    if let Some(notice) = notices.current() {
        let line = match notice.severity {
            Severity::Danger => style(&notice.message).red(),
            Severity::Warning => style(&notice.message).yellow(),
            Severity::Success => style(&notice.message).green(),
            Severity::Info => style(&notice.message).dim(),
        };
        println!("{line}");
    }
}

fn message_of(err: &quizmaster_client::QuizError) -> String {
    err.server_message()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string())
}
