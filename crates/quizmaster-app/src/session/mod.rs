/*
[INPUT]:  Quiz id, QuizBackend, session settings, user commands
[OUTPUT]: Timed quiz attempt submitted exactly once
[POS]:    Execution layer - student quiz-taking
[UPDATE]: When adding session submodules or changing public exports
*/

pub mod driver;
pub mod encoding;
pub mod quiz;
pub mod view;

pub use driver::{SessionCommand, SessionDriver, SessionExit};
pub use encoding::{AnswerEncoding, encode_answers};
pub use quiz::{
    QuizSession, Redirect, SessionConfig, SessionSnapshot, SubmissionState, SubmitOutcome,
    SubmitTrigger, TickOutcome,
};
pub use view::{QuestionMarker, answered_count, format_time, question_marker};
