/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::RemoteTaskState;
use super::models::{Attempt, AttemptStats, ResponseSheetEntry, ScoreSummary};

/// Reply to a job trigger request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerResponse {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply to `/api/task-status/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    #[serde(default)]
    pub task_id: Option<String>,
    /// Missing on malformed replies
    #[serde(default)]
    pub state: Option<RemoteTaskState>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub info: Option<serde_json::Value>,
}

impl TaskStatusResponse {
    /// Backend supplied result text (`result`, falling back to `info`)
    pub fn result_text(&self) -> Option<String> {
        let value = self.result.as_ref().or(self.info.as_ref())?;
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) if text.is_empty() => None,
            serde_json::Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Reply to a quiz submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(flatten)]
    pub summary: Option<ScoreSummary>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub questions: Vec<ResponseSheetEntry>,
}

/// Reply to `/api/student/attempts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptsResponse {
    #[serde(default)]
    pub attempts: Option<Vec<Attempt>>,
    #[serde(default)]
    pub stats: AttemptStats,
}

/// `{ "message": ... }` acknowledgement of an admin mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Reply to `PATCH /api/users/{id}/toggle-status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatus {
    pub id: u64,
    pub active: bool,
}
