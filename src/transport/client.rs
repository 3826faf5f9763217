//! Core `ChatTransport` trait and the `HttpTransport` implementation.
//!
//! `HttpTransport` talks to the interview backend:
//!
//! | Endpoint                 | Reply body              |
//! |--------------------------|-------------------------|
//! | `POST /chat`             | `{"response": "<text>"}`|
//! | `POST /generate_report`  | `{"report": "<text>"}`  |
//!
//! Both take `{"messages": [{"role": …, "content": …}, …]}`.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::BackendConfig;
use crate::transport::message::{ChatMessage, ChatRequest};

// ---------------------------------------------------------------------------
// TransportError
// ---------------------------------------------------------------------------

/// Errors that can occur talking to the backend.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("backend request timed out")]
    Timeout,

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {0}")]
    Status(u16),

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse backend response: {0}")]
    Parse(String),

    /// The expected reply field was missing or blank.
    #[error("backend returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = e.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ChatTransport trait
// ---------------------------------------------------------------------------

/// Request/response channel to the interview backend.
///
/// Implementors must be `Send + Sync` so they can be held behind
/// `Arc<dyn ChatTransport>`.  Both calls take the full ordered history.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Next assistant turn for `history`.
    async fn send_chat(&self, history: &[ChatMessage]) -> Result<String, TransportError>;

    /// Clinical prep report text for `history`.
    async fn generate_report(&self, history: &[ChatMessage]) -> Result<String, TransportError>;
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// JSON-over-HTTP transport.  All connection details come from
/// [`BackendConfig`].
pub struct HttpTransport {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpTransport {
    /// Build an `HttpTransport` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.
    pub fn from_config(config: &BackendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// POST `history` to `path` and pull the string field `field` out of
    /// the JSON reply.
    async fn post(
        &self,
        path: &str,
        field: &str,
        history: &[ChatMessage],
    ) -> Result<String, TransportError> {
        let url = self.endpoint(path);
        log::debug!("POST {url} ({} messages)", history.len());

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { messages: history })
            .send()
            .await?
            .error_for_status()?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))?;

        extract_field(&json, field)
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send_chat(&self, history: &[ChatMessage]) -> Result<String, TransportError> {
        let reply = self.post("chat", "response", history).await?;
        non_blank(reply)
    }

    async fn generate_report(&self, history: &[ChatMessage]) -> Result<String, TransportError> {
        self.post("generate_report", "report", history).await
    }
}

/// Pull the string `field` out of a reply body.  The text itself is
/// returned untouched; report layout depends on its exact line structure.
/// A blank report is still a report, so blank text is not rejected here.
fn extract_field(json: &serde_json::Value, field: &str) -> Result<String, TransportError> {
    json[field]
        .as_str()
        .map(str::to_string)
        .ok_or(TransportError::EmptyResponse)
}

/// A chat reply must carry a question to show the user.
fn non_blank(text: String) -> Result<String, TransportError> {
    if text.trim().is_empty() {
        Err(TransportError::EmptyResponse)
    } else {
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
