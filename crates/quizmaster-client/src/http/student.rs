/*
[INPUT]:  Quiz, subject and attempt identifiers; recorded answers
[OUTPUT]: Quiz content, submission scores, catalog and attempt history
[POS]:    HTTP layer - student endpoints (require student session)
[UPDATE]: When adding new student endpoints or changing payloads
[UPDATE]: 2026-10-14 Added catalog, attempts and session endpoints
[UPDATE]: 2026-10-19 Added dashboard stats
*/

use crate::http::{QuizClient, QuizError, Result};
use crate::types::{
    AttemptDetail, AttemptsResponse, Chapter, CurrentUser, QuizDetails, QuizSummary,
    StudentStats, SubmitAnswersRequest, SubmitResponse, Subject,
};
use reqwest::{Method, StatusCode};

impl QuizClient {
    /// Fetch quiz metadata and questions
    ///
    /// GET /api/student/quiz/{id}
    pub async fn quiz_details(&self, quiz_id: u64) -> Result<QuizDetails> {
        let endpoint = format!("/api/student/quiz/{}", quiz_id);
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Submit the answer sheet for grading
    ///
    /// POST /api/student/quiz/{id}/submit
    /// A 200 reply carrying `error` is reported as an API error.
    pub async fn submit_quiz(
        &self,
        quiz_id: u64,
        request: &SubmitAnswersRequest,
    ) -> Result<SubmitResponse> {
        let endpoint = format!("/api/student/quiz/{}/submit", quiz_id);
        let builder = self.request(Method::POST, &endpoint)?.json(request);
        let response: SubmitResponse = self.send_json(builder).await?;

        if let Some(message) = &response.error {
            return Err(QuizError::api_error(StatusCode::OK, message.clone()));
        }
        if response.summary.is_none() {
            return Err(QuizError::InvalidResponse(
                "submission reply has no score".to_string(),
            ));
        }
        Ok(response)
    }

    /// Quizzes currently open to the student
    ///
    /// GET /api/student/available-quizzes
    pub async fn available_quizzes(&self) -> Result<Vec<QuizSummary>> {
        let builder = self.request(Method::GET, "/api/student/available-quizzes")?;
        self.send_json(builder).await
    }

    /// GET /api/subjects
    pub async fn subjects(&self) -> Result<Vec<Subject>> {
        let builder = self.request(Method::GET, "/api/subjects")?;
        self.send_json(builder).await
    }

    /// GET /api/subjects/{id}/chapters
    pub async fn chapters(&self, subject_id: u64) -> Result<Vec<Chapter>> {
        let endpoint = format!("/api/subjects/{}/chapters", subject_id);
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Past attempts with aggregate statistics
    ///
    /// GET /api/student/attempts
    pub async fn attempts(&self) -> Result<AttemptsResponse> {
        let builder = self.request(Method::GET, "/api/student/attempts")?;
        let response: AttemptsResponse = self.send_json(builder).await?;
        if response.attempts.is_none() {
            return Err(QuizError::InvalidResponse(
                "No attempts data received".to_string(),
            ));
        }
        Ok(response)
    }

    /// GET /api/student/attempts/{id}
    pub async fn attempt_detail(&self, attempt_id: u64) -> Result<AttemptDetail> {
        let endpoint = format!("/api/student/attempts/{}", attempt_id);
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Dashboard totals, recent scores and per-subject averages
    ///
    /// GET /api/student/stats
    pub async fn student_stats(&self) -> Result<StudentStats> {
        let builder = self.request(Method::GET, "/api/student/stats")?;
        self.send_json(builder).await
    }

    /// GET /api/current-user
    pub async fn current_user(&self) -> Result<CurrentUser> {
        let builder = self.request(Method::GET, "/api/current-user")?;
        self.send_json(builder).await
    }

    /// POST /api/logout
    pub async fn logout(&self) -> Result<()> {
        let builder = self.request(Method::POST, "/api/logout")?;
        self.send_empty(builder).await
    }
}
