/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public quiz backend client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod backend;
pub mod http;
pub mod types;

pub use backend::QuizBackend;

// Re-export commonly used types from http
pub use http::{ClientConfig, DEFAULT_BASE_URL, QuizClient, QuizError, Result};

// Re-export all types
pub use types::*;
