//! Email delivery providers.
//!
//! The renderer never talks to a provider. [`crate::service::TemplateMailer`]
//! builds an [`OutgoingEmail`] from a rendered template and hands it to an
//! [`EmailProvider`].

mod mock;
mod resend;

pub use mock::MockEmailProvider;
pub use resend::{ResendConfig, ResendProvider};

use crate::error::NotificationResult;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// A message ready for delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Sender, usually `Display Name <address>`.
    pub from: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    /// Extra message headers, sent in key order.
    pub headers: BTreeMap<String, String>,
}

/// Provider acknowledgement for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Provider-specific message ID for tracking.
    pub message_id: String,
}

/// Trait for email sending providers.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send an email.
    async fn send(&self, email: &OutgoingEmail) -> NotificationResult<SentEmail>;

    /// Get the provider name for logging.
    fn name(&self) -> &'static str;

    /// Check if the provider is configured well enough to send.
    async fn health_check(&self) -> NotificationResult<bool>;
}
