/*
[INPUT]:  Status and error messages raised by screens and state machines
[OUTPUT]: The notice currently visible to the user
[POS]:    Presentation helpers - transient vs persistent messages
[UPDATE]: When changing how long list-operation errors stay on screen
*/

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Display severity tag consumed by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    expires_at: Option<Instant>,
}

impl Notice {
    pub fn is_transient(&self) -> bool {
        self.expires_at.is_some()
    }
}

/// Single-slot message area; a new notice always supersedes the old one.
#[derive(Debug)]
pub struct NoticeBoard {
    current: Option<Notice>,
    ttl: Duration,
}

impl NoticeBoard {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    /// Post a message that clears itself after the board's TTL
    pub fn post_transient(&mut self, message: impl Into<String>, severity: Severity) {
        self.current = Some(Notice {
            message: message.into(),
            severity,
            expires_at: Some(Instant::now() + self.ttl),
        });
    }

    /// Post a message that stays until superseded or cleared
    pub fn post_persistent(&mut self, message: impl Into<String>, severity: Severity) {
        self.current = Some(Notice {
            message: message.into(),
            severity,
            expires_at: None,
        });
    }

    /// Current notice, dropping it first if it has expired
    pub fn current(&mut self) -> Option<&Notice> {
        if let Some(expires_at) = self.current.as_ref().and_then(|notice| notice.expires_at)
            && Instant::now() >= expires_at
        {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_transient_notice_clears_after_ttl() {
        let mut board = NoticeBoard::default();
        board.post_transient("Failed to load quizzes", Severity::Danger);

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert_eq!(
            board.current().map(|notice| notice.message.as_str()),
            Some("Failed to load quizzes")
        );

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(board.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistent_notice_stays_until_superseded() {
        let mut board = NoticeBoard::default();
        board.post_persistent("Error: Database Backup failed", Severity::Danger);

        tokio::time::sleep(Duration::from_secs(60)).await;
        let notice = board.current().expect("still visible");
        assert!(!notice.is_transient());

        board.post_transient("Subject saved", Severity::Success);
        assert_eq!(board.current().map(|notice| notice.severity), Some(Severity::Success));

        board.clear();
        assert!(board.current().is_none());
    }
}
