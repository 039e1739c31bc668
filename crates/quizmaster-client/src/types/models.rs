/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
[UPDATE]: 2026-10-14 Added catalog and attempt review models
[UPDATE]: 2026-10-19 Added admin content, user and report models
*/

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::enums::QuizStatus;

/// One multiple-choice question. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    #[serde(rename = "question_text", alias = "text")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub marks: u32,
}

impl Question {
    /// Position of a literal option text within this question
    pub fn option_index(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|option| option == value)
    }
}

/// Quiz content returned by `/api/student/quiz/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDetails {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    /// Time limit in minutes
    pub duration: u32,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Score summary returned after a successful submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Percentage score
    pub score: f64,
    pub total_marks: u32,
    pub scored_marks: u32,
    #[serde(default)]
    pub attempt_id: Option<u64>,
}

/// Quiz listed on the student catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration: u32,
    #[serde(default)]
    pub questions_count: u32,
    pub subject_id: u64,
    #[serde(default)]
    pub subject_name: String,
    pub chapter_id: u64,
    #[serde(default)]
    pub chapter_name: String,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    /// Minutes until the quiz closes
    #[serde(default)]
    pub remaining_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub chapters_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subject_id: Option<u64>,
    #[serde(default)]
    pub quizzes_count: Option<u32>,
}

/// Quiz row in the admin content tree (`/api/chapters/{id}/quizzes`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedQuiz {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Minutes
    pub duration: u32,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub questions_count: u32,
    #[serde(default)]
    pub status: QuizStatus,
}

/// Question as the admin sees it, answer key included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedQuestion {
    pub id: u64,
    #[serde(rename = "question_text")]
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub marks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub active: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|name| name == role)
    }
}

/// Headline numbers for `/api/reports/summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_attempts: u64,
    pub average_score: f64,
    pub active_users: u64,
    pub total_quizzes: u64,
}

/// Per-quiz row of `/api/reports/quiz-activity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizActivity {
    pub quiz_id: u64,
    pub quiz_title: String,
    #[serde(default)]
    pub chapter_name: String,
    #[serde(default)]
    pub subject_name: String,
    pub attempts: u64,
    pub avg_score: f64,
    /// Percentage of attempts scoring 40 or more
    pub pass_rate: f64,
}

/// One day of `/api/reports/time-series`; days without attempts are zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub avg_score: f64,
    pub attempts: u64,
}

/// Student dashboard figures from `/api/student/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    pub total_attempts: u64,
    pub average_score: f64,
    /// Latest five attempts, newest first
    #[serde(default)]
    pub recent_performance: Vec<RecentPerformance>,
    #[serde(default)]
    pub subject_performance: Vec<SubjectPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPerformance {
    pub quiz_title: String,
    pub score: f64,
    /// `YYYY-MM-DD HH:MM` as rendered by the backend
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectPerformance {
    pub subject: String,
    pub avg_score: f64,
    pub attempts: u64,
}

/// One graded row of a submitted attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSheetEntry {
    pub question_id: u64,
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub user_answer: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub marks: u32,
    #[serde(default)]
    pub scored_marks: u32,
}

/// Past attempt listed on the results screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: u64,
    #[serde(default)]
    pub quiz_id: Option<u64>,
    pub quiz_title: String,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub chapter_name: String,
    pub score: f64,
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub response_sheet: Vec<ResponseSheetEntry>,
}

/// Aggregate statistics as sent by the backend (numbers may arrive as strings)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttemptStats {
    #[serde(rename = "averageScore", default)]
    pub average_score: Option<serde_json::Value>,
    #[serde(rename = "totalAttempts", default)]
    pub total_attempts: Option<serde_json::Value>,
    #[serde(rename = "passRate", default)]
    pub pass_rate: Option<serde_json::Value>,
}

/// Detailed attempt from `/api/student/attempts/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptDetail {
    pub id: u64,
    pub quiz_title: String,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub chapter_name: String,
    pub score: f64,
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub duration: Option<serde_json::Value>,
    #[serde(default)]
    pub started_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub correct_answers: u32,
    #[serde(default)]
    pub response_sheet: Vec<ResponseSheetEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}
