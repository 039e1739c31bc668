/*
[INPUT]:  Error sources (HTTP transport, backend responses, serialization, auth)
[OUTPUT]: Structured error types with display messages and auth hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the quiz backend client
#[derive(Error, Debug)]
pub enum QuizError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a business error
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Backend refused the request (401/403)
    #[error("Not authorized: {message}")]
    Forbidden { message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuizError {
    /// Check if error indicates an authorization failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, QuizError::Forbidden { .. })
    }

    /// Message supplied by the backend, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            QuizError::Api { message, .. } | QuizError::Forbidden { message } => Some(message),
            _ => None,
        }
    }

    /// Create an error from a status code and backend message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => QuizError::Forbidden { message },
            _ => QuizError::Api {
                code: status.as_u16() as i32,
                message,
            },
        }
    }
}

/// Result type alias for quiz client operations
pub type Result<T> = std::result::Result<T, QuizError>;
