//! Resend email provider implementation.

use super::{EmailProvider, OutgoingEmail, SentEmail};
use crate::error::{NotificationError, NotificationResult};
use async_trait::async_trait;
use core_config::{env_or_default, env_required, ConfigError, FromEnv};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

const DEFAULT_API_URL: &str = "https://api.resend.com";

/// Resend API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendConfig {
    pub api_key: String,
    /// API base URL without trailing slash.
    pub api_url: String,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl FromEnv for ResendConfig {
    /// Reads from environment variables:
    /// - RESEND_API_KEY: required
    /// - RESEND_API_URL: https://api.resend.com
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("RESEND_API_KEY")?;
        let api_url = env_or_default("RESEND_API_URL", DEFAULT_API_URL);
        Ok(Self::new(api_key).with_api_url(api_url))
    }
}

/// Resend email provider.
pub struct ResendProvider {
    config: ResendConfig,
    client: Client,
}

impl ResendProvider {
    pub fn new(config: ResendConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Create a provider from environment variables.
    pub fn from_env() -> NotificationResult<Self> {
        let config = ResendConfig::from_env()?;
        Ok(Self::new(config))
    }
}

// Resend API request/response structures

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<&'a BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendError {
    message: String,
}

#[async_trait]
impl EmailProvider for ResendProvider {
    async fn send(&self, email: &OutgoingEmail) -> NotificationResult<SentEmail> {
        let request = ResendRequest {
            from: &email.from,
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
            reply_to: email.reply_to.as_deref(),
            headers: (!email.headers.is_empty()).then_some(&email.headers),
        };

        debug!(
            to = %email.to,
            subject = %email.subject,
            headers = email.headers.len(),
            "Sending email via Resend"
        );

        let response = self
            .client
            .post(format!("{}/emails", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let accepted: ResendResponse = serde_json::from_str(&body).map_err(|e| {
                NotificationError::ProviderError(format!("Unexpected Resend response: {e}"))
            })?;
            info!(to = %email.to, message_id = %accepted.id, "Email sent via Resend");
            return Ok(SentEmail {
                message_id: accepted.id,
            });
        }

        let message = serde_json::from_str::<ResendError>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        warn!(
            to = %email.to,
            status = %status,
            error = %message,
            "Resend rejected email"
        );

        Err(NotificationError::ProviderRejected {
            status: status.as_u16(),
            message,
        })
    }

    fn name(&self) -> &'static str {
        "Resend"
    }

    async fn health_check(&self) -> NotificationResult<bool> {
        // Resend has no health endpoint; settle for the key format.
        if self.config.api_key.starts_with("re_") {
            Ok(true)
        } else {
            Err(NotificationError::ConfigError(
                "Invalid Resend API key format".to_string(),
            ))
        }
    }
}
