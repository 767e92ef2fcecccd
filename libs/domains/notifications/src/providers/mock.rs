//! Mock email provider for testing and dry runs.

use super::{EmailProvider, OutgoingEmail, SentEmail};
use crate::error::{NotificationError, NotificationResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Provider that records every message instead of delivering it.
#[derive(Clone)]
pub struct MockEmailProvider {
    sent_emails: Arc<Mutex<Vec<OutgoingEmail>>>,
    failure_message: Option<String>,
}

impl MockEmailProvider {
    pub fn new() -> Self {
        Self {
            sent_emails: Arc::new(Mutex::new(Vec::new())),
            failure_message: None,
        }
    }

    /// A provider whose every send is rejected with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent_emails: Arc::new(Mutex::new(Vec::new())),
            failure_message: Some(message.into()),
        }
    }

    pub async fn sent_emails(&self) -> Vec<OutgoingEmail> {
        self.sent_emails.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent_emails.lock().await.len()
    }

    pub async fn was_sent_to(&self, address: &str) -> bool {
        self.sent_emails
            .lock()
            .await
            .iter()
            .any(|e| e.to == address)
    }
}

impl Default for MockEmailProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    async fn send(&self, email: &OutgoingEmail) -> NotificationResult<SentEmail> {
        if let Some(message) = &self.failure_message {
            return Err(NotificationError::ProviderRejected {
                status: 500,
                message: message.clone(),
            });
        }

        self.sent_emails.lock().await.push(email.clone());

        Ok(SentEmail {
            message_id: format!("mock-{}", Uuid::new_v4()),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    async fn health_check(&self) -> NotificationResult<bool> {
        Ok(self.failure_message.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.to_string(),
            subject: "Test Subject".to_string(),
            text: "Test body".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_mock_provider_records_email() {
        let provider = MockEmailProvider::new();

        let sent = provider.send(&email("test@example.com")).await.unwrap();
        assert!(sent.message_id.starts_with("mock-"));

        let recorded = provider.sent_emails().await;
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].to, "test@example.com");
        assert!(provider.was_sent_to("test@example.com").await);
        assert!(!provider.was_sent_to("other@example.com").await);
    }

    #[tokio::test]
    async fn test_mock_provider_fails() {
        let provider = MockEmailProvider::failing("Simulated failure");

        let err = provider.send(&email("test@example.com")).await.unwrap_err();
        assert!(err.to_string().contains("Simulated failure"));
        assert_eq!(provider.sent_count().await, 0);
        assert!(!provider.health_check().await.unwrap());
    }
}
