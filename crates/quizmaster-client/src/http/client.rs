/*
[INPUT]:  HTTP configuration (base URL, timeouts, session headers)
[OUTPUT]: Configured reqwest client ready for quiz backend calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
[UPDATE]: 2026-10-12 Map non-2xx bodies onto QuizError with backend message
[UPDATE]: 2026-10-19 Percent-encode caller-supplied path segments
*/

use crate::http::{QuizError, Result};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default backend address (development server)
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const CSRF_HEADER: &str = "X-CSRF-TOKEN";
const REQUESTED_WITH_HEADER: &str = "X-Requested-With";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the quiz backend
#[derive(Debug, Clone)]
pub struct QuizClient {
    http_client: Client,
    base_url: Url,
    csrf_token: Option<String>,
    session_cookie: Option<String>,
}

impl QuizClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client pointed at an explicit backend
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            REQUESTED_WITH_HEADER,
            HeaderValue::from_static("XMLHttpRequest"),
        );

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .default_headers(default_headers)
            .build()?;

        let base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(QuizError::Config(format!(
                "backend URL must use http or https: {base_url}"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
            csrf_token: None,
            session_cookie: None,
        })
    }

    /// Set the CSRF token sent with every request
    pub fn set_csrf_token(&mut self, token: impl Into<String>) {
        self.csrf_token = Some(token.into());
    }

    /// Set the session cookie issued by the backend login
    pub fn set_session_cookie(&mut self, cookie: impl Into<String>) {
        self.session_cookie = Some(cookie.into());
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an API endpoint
    fn url(&self, endpoint: &str) -> std::result::Result<Url, url::ParseError> {
        self.base_url.join(endpoint)
    }

    /// Build a URL from a fixed prefix plus one opaque segment.
    ///
    /// The segment is percent-encoded, so `/`, `?` and `#` stay inside it.
    fn segment_url(&self, prefix: &str, segment: &str) -> Result<Url> {
        let mut full = self.url(prefix)?;
        full.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(segment);
        Ok(full)
    }

    /// Build a request builder carrying the session headers
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        Ok(self.request_to(method, url))
    }

    /// Build a request for `prefix` followed by an encoded `segment`
    pub(crate) fn request_segment(
        &self,
        method: Method,
        prefix: &str,
        segment: &str,
    ) -> Result<RequestBuilder> {
        let url = self.segment_url(prefix, segment)?;
        Ok(self.request_to(method, url))
    }

    fn request_to(&self, method: Method, url: Url) -> RequestBuilder {
        let mut builder = self.http_client.request(method, url);
        if let Some(token) = &self.csrf_token {
            builder = builder.header(CSRF_HEADER, token);
        }
        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder
    }

    /// Send a request and decode a JSON body, mapping error statuses
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "backend response");

        if !status.is_success() {
            return Err(error_from_response(status, response).await);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            QuizError::InvalidResponse(format!("unexpected response body: {err}"))
        })
    }

    /// Send a request whose body is irrelevant to the caller
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(status, response).await);
        }
        Ok(())
    }
}

/// Pull the backend's `error`/`message` field out of a failed response
async fn error_from_response(status: StatusCode, response: Response) -> QuizError {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .or_else(|| value.get("message"))
                .and_then(|field| field.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    QuizError::api_error(status, message)
}
