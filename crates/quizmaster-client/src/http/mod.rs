/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod admin;
pub mod client;
pub mod error;
pub mod manage;
pub mod reports;
pub mod student;

pub use error::{QuizError, Result};

pub use client::{ClientConfig, DEFAULT_BASE_URL, QuizClient};
