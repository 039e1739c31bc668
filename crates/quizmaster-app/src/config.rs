/*
[INPUT]:  YAML configuration file, QUIZMASTER_* environment overrides
[OUTPUT]: Parsed application configuration and derived component settings
[POS]:    Configuration layer - client, poller and session setup
[UPDATE]: When adding new configuration options
[UPDATE]: 2026-10-19 Reject zero poll/tick intervals at load time
*/

use anyhow::{Context, bail};
use quizmaster_client::{ClientConfig, DEFAULT_BASE_URL, QuizClient};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::session::{AnswerEncoding, SessionConfig};
use crate::task_runner::{DEFAULT_MAX_POLL_ATTEMPTS, PollConfig};

const ENV_PREFIX: &str = "QUIZMASTER";

/// Top-level configuration for the quizmaster client
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Backend root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Sent as X-CSRF-TOKEN
    #[serde(default)]
    pub csrf_token: Option<String>,
    /// Raw Cookie header value for an authenticated session
    #[serde(default)]
    pub session_cookie: Option<String>,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub quiz: QuizSettings,
    /// Lifetime of transient list-operation messages
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,
}

/// Background job polling
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PollSettings {
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,
    /// `null` polls until the job finishes
    #[serde(default = "default_max_attempts")]
    pub max_attempts: Option<u32>,
}

/// Timed quiz behaviour
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuizSettings {
    #[serde(default)]
    pub answer_encoding: AnswerEncoding,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
    #[serde(default = "default_redirect_target")]
    pub redirect_target: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            csrf_token: None,
            session_cookie: None,
            poll: PollSettings::default(),
            quiz: QuizSettings::default(),
            notice_ttl_ms: default_notice_ttl_ms(),
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            answer_encoding: AnswerEncoding::default(),
            tick_interval_ms: default_tick_interval_ms(),
            redirect_delay_ms: default_redirect_delay_ms(),
            redirect_target: default_redirect_target(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_ms() -> u64 {
    2_000
}

fn default_max_attempts() -> Option<u32> {
    Some(DEFAULT_MAX_POLL_ATTEMPTS)
}

fn default_tick_interval_ms() -> u64 {
    1_000
}

fn default_redirect_delay_ms() -> u64 {
    3_000
}

fn default_redirect_target() -> String {
    crate::session::quiz::DEFAULT_REDIRECT_TARGET.to_string()
}

fn default_notice_ttl_ms() -> u64 {
    5_000
}

impl AppConfig {
    /// Load configuration from a YAML file layered with environment overrides
    /// (`QUIZMASTER_BASE_URL`, `QUIZMASTER_POLL__INTERVAL_MS`, ...)
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        Self::from_file_with_env_prefix(path, ENV_PREFIX)
    }

    fn from_file_with_env_prefix(path: &Path, env_prefix: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Yaml))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = settings
            .try_deserialize()
            .with_context(|| format!("parse config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the poller and countdown cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll.interval_ms == 0 {
            bail!("poll.interval_ms must be greater than zero");
        }
        if self.poll.max_attempts == Some(0) {
            bail!("poll.max_attempts must be greater than zero (use null for no limit)");
        }
        if self.quiz.tick_interval_ms == 0 {
            bail!("quiz.tick_interval_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// `<config dir>/quizmaster/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quizmaster").join("config.yaml"))
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    /// Build a client carrying the configured session headers
    pub fn build_client(&self) -> anyhow::Result<QuizClient> {
        let mut client = QuizClient::with_config_and_base_url(self.client_config(), &self.base_url)
            .with_context(|| format!("invalid base_url {}", self.base_url))?;
        if let Some(token) = &self.csrf_token {
            client.set_csrf_token(token.clone());
        }
        if let Some(cookie) = &self.session_cookie {
            client.set_session_cookie(cookie.clone());
        }
        Ok(client)
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(self.poll.interval_ms),
            max_attempts: self.poll.max_attempts,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            answer_encoding: self.quiz.answer_encoding,
            tick_interval: Duration::from_millis(self.quiz.tick_interval_ms),
            redirect_delay: Duration::from_millis(self.quiz.redirect_delay_ms),
            redirect_target: self.quiz.redirect_target.clone(),
        }
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }
}
