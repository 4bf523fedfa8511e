//! Client for the externally hosted email-sending function.
//!
//! The function accepts `{ to, from, subject, html }` (optionally `cc` and a
//! base64-encoded attachment) as JSON and replies `{ "success": true }` on
//! 2xx. Failures are surfaced directly to the caller; this boundary is
//! invoked unwrapped, without the retry executor.

pub mod templates;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MailerConfig {
    /// URL of the hosted send-email function.
    pub endpoint: String,
    /// Default sender address.
    pub from: String,
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

fn default_timeout_sec() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAttachment {
    pub filename: String,
    /// Base64-encoded file content, passed through unmodified.
    pub content_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<EmailAttachment>,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("email request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("email rejected by sender function (status {status}): {detail}")]
    Rejected { status: u16, detail: String },
}

/// HTTP client for the send-email function.
#[derive(Clone)]
pub struct EmailClient {
    http: reqwest::Client,
    endpoint: String,
    from: String,
}

impl EmailClient {
    pub fn new(config: &MailerConfig) -> Result<Self, MailerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            from: config.from.clone(),
        })
    }

    /// Default sender address from the configuration.
    pub fn default_from(&self) -> &str {
        &self.from
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let resp = self.http.post(&self.endpoint).json(message).send().await?;
        let status = resp.status();
        if status.is_success() {
            tracing::debug!(to = %message.to, subject = %message.subject, "email accepted");
            return Ok(());
        }
        let detail = resp.text().await.unwrap_or_default();
        Err(MailerError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}
