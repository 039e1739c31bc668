/*
[INPUT]:  Public API exports for quizmaster-app crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod catalog;
pub mod config;
pub mod notice;
pub mod reports;
pub mod results;
pub mod session;
pub mod task_runner;

// Re-export main types for convenience
pub use catalog::QuizFilter;
pub use config::AppConfig;
pub use notice::{Notice, NoticeBoard, Severity};
pub use reports::ReportsView;
pub use results::{ResultsView, ScoreBand};
pub use session::{
    AnswerEncoding, QuizSession, SessionCommand, SessionConfig, SessionDriver, SessionExit,
    SessionSnapshot, SubmissionState, SubmitOutcome,
};
pub use task_runner::{PollConfig, Task, TaskRunner, TaskState};
