/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::enums::ReportPeriod;

/// A selected answer as the quiz page recorded it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Position within the question's options
    Index(usize),
    /// Literal option text
    Text(String),
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Index(index) => write!(f, "#{index}"),
            AnswerValue::Text(text) => f.write_str(text),
        }
    }
}

/// Body of `POST /api/student/quiz/{id}/submit`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitAnswersRequest {
    /// Keyed by question id rendered as a string
    pub answers: BTreeMap<String, AnswerValue>,
}

impl SubmitAnswersRequest {
    pub fn from_answers<I>(answers: I) -> Self
    where
        I: IntoIterator<Item = (u64, AnswerValue)>,
    {
        Self {
            answers: answers
                .into_iter()
                .map(|(question_id, value)| (question_id.to_string(), value))
                .collect(),
        }
    }
}

/// Query string shared by the `/api/reports/*` endpoints.
///
/// The backend applies `chapter_id` in preference to `subject_id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    pub time_period: ReportPeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<u64>,
}

impl ReportFilter {
    pub fn new(time_period: ReportPeriod) -> Self {
        Self {
            time_period,
            ..Self::default()
        }
    }

    /// Narrow to a subject; any chapter picked under another subject is cleared
    pub fn with_subject(mut self, subject_id: Option<u64>) -> Self {
        if self.subject_id != subject_id {
            self.chapter_id = None;
        }
        self.subject_id = subject_id;
        self
    }

    pub fn with_chapter(mut self, chapter_id: Option<u64>) -> Self {
        self.chapter_id = chapter_id;
        self
    }
}
