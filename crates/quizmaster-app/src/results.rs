/*
[INPUT]:  Attempt history and statistics from the backend
[OUTPUT]: Normalised results view, score bands, search filtering
[POS]:    Presentation helpers - student results review
[UPDATE]: When changing pass thresholds or searchable attempt fields
*/

use quizmaster_client::{Attempt, AttemptStats, AttemptsResponse};

use crate::notice::Severity;

/// Colour band for a percentage score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Success,
    Warning,
    Danger,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 75.0 {
            ScoreBand::Success
        } else if score >= 40.0 {
            ScoreBand::Warning
        } else {
            ScoreBand::Danger
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            ScoreBand::Success => Severity::Success,
            ScoreBand::Warning => Severity::Warning,
            ScoreBand::Danger => Severity::Danger,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResultsStats {
    pub average_score: f64,
    pub total_attempts: u64,
    pub pass_rate: f64,
}

impl ResultsStats {
    fn from_wire(stats: &AttemptStats) -> Self {
        Self {
            average_score: number(stats.average_score.as_ref()),
            total_attempts: number(stats.total_attempts.as_ref()).max(0.0) as u64,
            pass_rate: number(stats.pass_rate.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsView {
    pub attempts: Vec<Attempt>,
    pub stats: ResultsStats,
}

impl ResultsView {
    pub fn from_response(response: AttemptsResponse) -> Self {
        Self {
            stats: ResultsStats::from_wire(&response.stats),
            attempts: response.attempts.unwrap_or_default(),
        }
    }

    pub fn filtered(&self, query: &str) -> Vec<&Attempt> {
        filter_attempts(&self.attempts, query)
    }
}

/// Case-insensitive match on quiz title or subject name
pub fn filter_attempts<'a>(attempts: &'a [Attempt], query: &str) -> Vec<&'a Attempt> {
    let query = query.trim().to_lowercase();
    attempts
        .iter()
        .filter(|attempt| {
            query.is_empty()
                || attempt.quiz_title.to_lowercase().contains(&query)
                || attempt.subject_name.to_lowercase().contains(&query)
        })
        .collect()
}

/// Numbers arrive as JSON numbers or numeric strings; anything else is 0
fn number(value: Option<&serde_json::Value>) -> f64 {
    match value {
        Some(serde_json::Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(text)) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
