/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
[UPDATE]: 2026-10-19 Added report period and admin quiz status
*/

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Background jobs an administrator can start from the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Report,
    Backup,
    Analytics,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [TaskType::Report, TaskType::Backup, TaskType::Analytics];

    /// Trigger endpoint for this job
    pub fn endpoint(self) -> &'static str {
        match self {
            TaskType::Report => "/api/admin/trigger-report",
            TaskType::Backup => "/api/admin/trigger-backup",
            TaskType::Analytics => "/api/admin/export-analytics",
        }
    }

    /// Human readable job name used in status messages
    pub fn display_name(self) -> &'static str {
        match self {
            TaskType::Report => "Monthly Report",
            TaskType::Backup => "Database Backup",
            TaskType::Analytics => "Analytics Export",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::Report => "report",
            TaskType::Backup => "backup",
            TaskType::Analytics => "analytics",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "report" => Ok(TaskType::Report),
            "backup" => Ok(TaskType::Backup),
            "analytics" => Ok(TaskType::Analytics),
            other => Err(format!("Invalid task type: {other}")),
        }
    }
}

/// Job state reported by `/api/task-status/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteTaskState {
    Pending,
    Started,
    Success,
    Failure,
    /// Any state the client does not model (RETRY, REVOKED, custom states)
    Other(String),
}

impl RemoteTaskState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "PENDING" => RemoteTaskState::Pending,
            "STARTED" => RemoteTaskState::Started,
            "SUCCESS" => RemoteTaskState::Success,
            "FAILURE" => RemoteTaskState::Failure,
            other => RemoteTaskState::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RemoteTaskState::Pending => "PENDING",
            RemoteTaskState::Started => "STARTED",
            RemoteTaskState::Success => "SUCCESS",
            RemoteTaskState::Failure => "FAILURE",
            RemoteTaskState::Other(raw) => raw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RemoteTaskState::Success | RemoteTaskState::Failure)
    }
}

impl Serialize for RemoteTaskState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RemoteTaskState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(RemoteTaskState::parse(&raw))
    }
}

/// Reporting window accepted by `/api/reports/*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReportPeriod {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "90days")]
    Last90Days,
}

impl ReportPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportPeriod::All => "all",
            ReportPeriod::Last7Days => "7days",
            ReportPeriod::Last30Days => "30days",
            ReportPeriod::Last90Days => "90days",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportPeriod::All => "All time",
            ReportPeriod::Last7Days => "Last 7 days",
            ReportPeriod::Last30Days => "Last 30 days",
            ReportPeriod::Last90Days => "Last 90 days",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ReportPeriod::All),
            "7days" => Ok(ReportPeriod::Last7Days),
            "30days" => Ok(ReportPeriod::Last30Days),
            "90days" => Ok(ReportPeriod::Last90Days),
            other => Err(format!("Invalid report period: {other}")),
        }
    }
}

/// Whether a quiz is inside its open window, as computed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizStatus {
    Active,
    #[default]
    Inactive,
}
