/*
[INPUT]:  ReportFilter (period, subject, chapter)
[OUTPUT]: Summary figures, per-quiz activity and daily score series
[POS]:    HTTP layer - admin reporting endpoints (require admin session)
[UPDATE]: When report payloads or filters change
*/

use crate::http::{QuizClient, Result};
use crate::types::{QuizActivity, ReportFilter, ReportSummary, TimeSeriesPoint};
use reqwest::Method;

impl QuizClient {
    /// GET /api/reports/summary
    pub async fn report_summary(&self, filter: &ReportFilter) -> Result<ReportSummary> {
        let builder = self.request(Method::GET, "/api/reports/summary")?.query(filter);
        self.send_json(builder).await
    }

    /// GET /api/reports/quiz-activity
    pub async fn quiz_activity(&self, filter: &ReportFilter) -> Result<Vec<QuizActivity>> {
        let builder = self
            .request(Method::GET, "/api/reports/quiz-activity")?
            .query(filter);
        self.send_json(builder).await
    }

    /// One point per day in the window, oldest first
    ///
    /// GET /api/reports/time-series
    pub async fn time_series(&self, filter: &ReportFilter) -> Result<Vec<TimeSeriesPoint>> {
        let builder = self
            .request(Method::GET, "/api/reports/time-series")?
            .query(filter);
        self.send_json(builder).await
    }
}
