/*
[INPUT]:  ReportFilter and the admin reporting endpoints
[OUTPUT]: Combined reports view with per-section failure notices
[POS]:    Presentation helpers - admin reports page
[UPDATE]: When report sections or their ordering change
*/

use quizmaster_client::{QuizActivity, QuizClient, ReportFilter, ReportSummary, TimeSeriesPoint};
use tracing::warn;

use crate::notice::{NoticeBoard, Severity};

/// Summary, activity table and daily series for one filter.
///
/// A section that fails to load stays empty; the failure is posted as a
/// transient notice and the other sections are still shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportsView {
    pub filter: ReportFilter,
    pub summary: ReportSummary,
    pub activity: Vec<QuizActivity>,
    pub series: Vec<TimeSeriesPoint>,
}

impl ReportsView {
    pub async fn load(client: &QuizClient, filter: ReportFilter, notices: &mut NoticeBoard) -> Self {
        let (summary, activity, series) = tokio::join!(
            client.report_summary(&filter),
            client.quiz_activity(&filter),
            client.time_series(&filter),
        );

        let mut view = Self {
            filter,
            ..Self::default()
        };
        match summary {
            Ok(summary) => view.summary = summary,
            Err(err) => report_failure(notices, "summary", &err),
        }
        match activity {
            Ok(activity) => view.activity = activity,
            Err(err) => report_failure(notices, "quiz activity", &err),
        }
        match series {
            Ok(series) => view.series = series,
            Err(err) => report_failure(notices, "score trend", &err),
        }
        view
    }

    /// Activity rows, most attempted first (ties by title)
    pub fn busiest_quizzes(&self) -> Vec<&QuizActivity> {
        let mut rows: Vec<&QuizActivity> = self.activity.iter().collect();
        rows.sort_by(|a, b| {
            b.attempts
                .cmp(&a.attempts)
                .then_with(|| a.quiz_title.cmp(&b.quiz_title))
        });
        rows
    }

    /// Days in the series with at least one attempt
    pub fn active_days(&self) -> usize {
        self.series.iter().filter(|point| point.attempts > 0).count()
    }
}

fn report_failure(notices: &mut NoticeBoard, section: &str, err: &quizmaster_client::QuizError) {
    warn!(section, error = %err, "report section failed");
    let detail = err
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string());
    notices.post_transient(format!("Failed to load {section}: {detail}"), Severity::Danger);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(title: &str, attempts: u64) -> QuizActivity {
        QuizActivity {
            quiz_id: attempts,
            quiz_title: title.to_string(),
            chapter_name: String::new(),
            subject_name: String::new(),
            attempts,
            avg_score: 50.0,
            pass_rate: 50.0,
        }
    }

    #[test]
    fn test_busiest_quizzes_ordering() {
        let view = ReportsView {
            activity: vec![activity("b", 2), activity("c", 7), activity("a", 2)],
            ..ReportsView::default()
        };
        let titles: Vec<&str> = view
            .busiest_quizzes()
            .into_iter()
            .map(|row| row.quiz_title.as_str())
            .collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_active_days_skips_zero_fill() {
        let day = |d: u32, attempts: u64| -> TimeSeriesPoint {
            serde_json::from_value(serde_json::json!({
                "date": format!("2026-10-{d:02}"),
                "avg_score": 0,
                "attempts": attempts
            }))
            .expect("point")
        };
        let view = ReportsView {
            series: vec![day(16, 0), day(17, 3), day(18, 0), day(19, 1)],
            ..ReportsView::default()
        };
        assert_eq!(view.active_days(), 2);
    }
}
