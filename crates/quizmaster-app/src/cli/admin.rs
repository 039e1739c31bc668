/*
[INPUT]:  AppConfig, admin subcommand arguments, confirmation prompts
[OUTPUT]: User table, report tables, content listings and deletions
[POS]:    CLI admin pages (users, reports, content)
[UPDATE]: When management endpoints or report sections change
*/

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use console::style;
use dialoguer::{Confirm, theme::ColorfulTheme};

use quizmaster_app::results::ScoreBand;
use quizmaster_app::{AppConfig, NoticeBoard, ReportsView};
use quizmaster_client::{QuizClient, QuizStatus, ReportFilter, ReportPeriod, User};

use super::listing::{print_notice, styled_score};

#[derive(Subcommand, Debug)]
pub enum ContentCommand {
    /// List subjects
    Subjects,
    /// List chapters of a subject
    Chapters {
        #[arg(value_name = "SUBJECT_ID")]
        subject_id: u64,
    },
    /// List quizzes of a chapter
    Quizzes {
        #[arg(value_name = "CHAPTER_ID")]
        chapter_id: u64,
    },
    /// List questions of a quiz with their answer keys
    Questions {
        #[arg(value_name = "QUIZ_ID")]
        quiz_id: u64,
    },
    /// Delete a subject, chapter, quiz or question
    Delete {
        #[arg(value_name = "KIND")]
        kind: ContentKind,
        #[arg(value_name = "ID")]
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    Subject,
    Chapter,
    Quiz,
    Question,
}

impl ContentKind {
    fn label(self) -> &'static str {
        match self {
            ContentKind::Subject => "subject",
            ContentKind::Chapter => "chapter",
            ContentKind::Quiz => "quiz",
            ContentKind::Question => "question",
        }
    }
}

pub async fn run_users(
    config: &AppConfig,
    delete: Option<u64>,
    toggle: Option<u64>,
    yes: bool,
) -> Result<()> {
    let client = config.build_client()?;

    if let Some(user_id) = toggle {
        let status = client
            .toggle_user_status(user_id)
            .await
            .with_context(|| format!("Failed to update user {user_id}"))?;
        let state = if status.active { "activated" } else { "deactivated" };
        println!("{}", style(format!("User {} {state}", status.id)).green());
    }

    if let Some(user_id) = delete
        && confirm(yes, &format!("Delete user {user_id}?"))?
    {
        let message = client
            .delete_user(user_id)
            .await
            .with_context(|| format!("Failed to delete user {user_id}"))?;
        println!("{}", style(message).green());
    }

    let users = client.users().await.context("Failed to load users")?;
    if users.is_empty() {
        println!("{}", style("No users found").dim());
    }
    for user in &users {
        print_user_row(user);
    }
    Ok(())
}

pub async fn run_reports(
    config: &AppConfig,
    period: ReportPeriod,
    subject: Option<u64>,
    chapter: Option<u64>,
) -> Result<()> {
    let client = config.build_client()?;
    let mut notices = NoticeBoard::new(config.notice_ttl());
    let filter = ReportFilter::new(period)
        .with_subject(subject)
        .with_chapter(chapter);

    let view = ReportsView::load(&client, filter, &mut notices).await;

    println!("{}", style(format!("Reports: {}", period.label())).bold().cyan());
    println!(
        "Attempts {}  |  Average {}  |  Active users {}  |  Quizzes {}",
        view.summary.total_attempts,
        styled_score(view.summary.average_score),
        view.summary.active_users,
        view.summary.total_quizzes
    );

    if !view.activity.is_empty() {
        println!("\n{}", style("Quiz activity").bold());
    }
    for row in view.busiest_quizzes() {
        let pass_rate = format!("{:.1}% pass", row.pass_rate);
        let pass_rate = match ScoreBand::for_score(row.pass_rate) {
            ScoreBand::Success => style(pass_rate).green(),
            ScoreBand::Warning => style(pass_rate).yellow(),
            ScoreBand::Danger => style(pass_rate).red(),
        };
        println!(
            "{:>5}  {}  {}  {} attempts  avg {}  {}",
            style(row.quiz_id).bold(),
            row.quiz_title,
            style(format!("{} / {}", row.subject_name, row.chapter_name)).dim(),
            row.attempts,
            styled_score(row.avg_score),
            pass_rate
        );
    }

    if !view.series.is_empty() {
        println!(
            "\n{} ({} of {} days with attempts)",
            style("Daily scores").bold(),
            view.active_days(),
            view.series.len()
        );
    }
    for point in view.series.iter().filter(|point| point.attempts > 0) {
        println!(
            "{}  {} attempts  avg {}",
            point.date,
            point.attempts,
            styled_score(point.avg_score)
        );
    }

    print_notice(&mut notices);
    Ok(())
}

pub async fn run_content(config: &AppConfig, command: ContentCommand) -> Result<()> {
    let client = config.build_client()?;
    match command {
        ContentCommand::Subjects => {
            let subjects = client.subjects().await.context("Failed to load subjects")?;
            for subject in subjects {
                println!(
                    "{:>5}  {}  {}",
                    style(subject.id).bold(),
                    subject.name,
                    style(format!("{} chapters", subject.chapters_count.unwrap_or(0))).dim()
                );
            }
        }
        ContentCommand::Chapters { subject_id } => {
            let chapters = client
                .chapters(subject_id)
                .await
                .with_context(|| format!("Failed to load chapters of subject {subject_id}"))?;
            for chapter in chapters {
                println!(
                    "{:>5}  {}  {}",
                    style(chapter.id).bold(),
                    chapter.name,
                    style(format!("{} quizzes", chapter.quizzes_count.unwrap_or(0))).dim()
                );
            }
        }
        ContentCommand::Quizzes { chapter_id } => {
            let quizzes = client
                .chapter_quizzes(chapter_id)
                .await
                .with_context(|| format!("Failed to load quizzes of chapter {chapter_id}"))?;
            for quiz in quizzes {
                let status = match quiz.status {
                    QuizStatus::Active => style("active").green(),
                    QuizStatus::Inactive => style("inactive").dim(),
                };
                println!(
                    "{:>5}  {}  {} min, {} questions  {}",
                    style(quiz.id).bold(),
                    quiz.title,
                    quiz.duration,
                    quiz.questions_count,
                    status
                );
            }
        }
        ContentCommand::Questions { quiz_id } => {
            let questions = client
                .quiz_questions(quiz_id)
                .await
                .with_context(|| format!("Failed to load questions of quiz {quiz_id}"))?;
            for (index, question) in questions.iter().enumerate() {
                println!(
                    "\n{} Q{}. {} ({} marks)",
                    style(question.id).dim(),
                    index + 1,
                    question.text,
                    question.marks
                );
                for option in &question.options {
                    let marker = if *option == question.correct_answer { "*" } else { " " };
                    println!("   {marker} {option}");
                }
            }
        }
        ContentCommand::Delete { kind, id, yes } => {
            if !confirm(yes, &format!("Delete {} {id}?", kind.label()))? {
                return Ok(());
            }
            let message = delete_content(&client, kind, id)
                .await
                .with_context(|| format!("Failed to delete {} {id}", kind.label()))?;
            println!("{}", style(message).green());
        }
    }
    Ok(())
}

async fn delete_content(
    client: &QuizClient,
    kind: ContentKind,
    id: u64,
) -> quizmaster_client::Result<String> {
    match kind {
        ContentKind::Subject => client.delete_subject(id).await,
        ContentKind::Chapter => client.delete_chapter(id).await,
        ContentKind::Quiz => client.delete_quiz(id).await,
        ContentKind::Question => client.delete_question(id).await,
    }
}

fn confirm(skip: bool, prompt: &str) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

fn print_user_row(user: &User) {
    let state = if user.active {
        style("active").green()
    } else {
        style("inactive").red()
    };
    println!(
        "{:>5}  {}  {}  {}  {}",
        style(user.id).bold(),
        user.username,
        style(user.email.as_deref().unwrap_or("-")).dim(),
        user.roles.join(","),
        state
    );
}
