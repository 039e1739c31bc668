/*
[INPUT]:  Subject, chapter, quiz, question and user identifiers
[OUTPUT]: Admin content listings, deletions and account status changes
[POS]:    HTTP layer - admin content and user management (require admin session)
[UPDATE]: When adding management endpoints or changing their payloads
*/

use crate::http::{QuizClient, Result};
use crate::types::{ManagedQuestion, ManagedQuiz, MessageResponse, User, UserStatus};
use reqwest::Method;

impl QuizClient {
    /// GET /api/chapters/{id}/quizzes
    pub async fn chapter_quizzes(&self, chapter_id: u64) -> Result<Vec<ManagedQuiz>> {
        let endpoint = format!("/api/chapters/{}/quizzes", chapter_id);
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Questions with their answer keys
    ///
    /// GET /api/quizzes/{id}/questions
    pub async fn quiz_questions(&self, quiz_id: u64) -> Result<Vec<ManagedQuestion>> {
        let endpoint = format!("/api/quizzes/{}/questions", quiz_id);
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// DELETE /api/subjects/{id}
    pub async fn delete_subject(&self, subject_id: u64) -> Result<String> {
        self.delete(&format!("/api/subjects/{}", subject_id)).await
    }

    /// DELETE /api/chapters/{id}
    pub async fn delete_chapter(&self, chapter_id: u64) -> Result<String> {
        self.delete(&format!("/api/chapters/{}", chapter_id)).await
    }

    /// DELETE /api/quizzes/{id}
    pub async fn delete_quiz(&self, quiz_id: u64) -> Result<String> {
        self.delete(&format!("/api/quizzes/{}", quiz_id)).await
    }

    /// DELETE /api/questions/{id}
    pub async fn delete_question(&self, question_id: u64) -> Result<String> {
        self.delete(&format!("/api/questions/{}", question_id)).await
    }

    /// GET /api/users
    pub async fn users(&self) -> Result<Vec<User>> {
        let builder = self.request(Method::GET, "/api/users")?;
        self.send_json(builder).await
    }

    /// DELETE /api/users/{id}
    pub async fn delete_user(&self, user_id: u64) -> Result<String> {
        self.delete(&format!("/api/users/{}", user_id)).await
    }

    /// Flip a user's active flag; returns the new state
    ///
    /// PATCH /api/users/{id}/toggle-status
    pub async fn toggle_user_status(&self, user_id: u64) -> Result<UserStatus> {
        let endpoint = format!("/api/users/{}/toggle-status", user_id);
        let builder = self.request(Method::PATCH, &endpoint)?;
        self.send_json(builder).await
    }

    /// Issue a DELETE and return the backend's confirmation text
    async fn delete(&self, endpoint: &str) -> Result<String> {
        let builder = self.request(Method::DELETE, endpoint)?;
        let response: MessageResponse = self.send_json(builder).await?;
        Ok(response.message)
    }
}
