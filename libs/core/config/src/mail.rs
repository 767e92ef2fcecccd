use crate::{env_or_default, ConfigError, FromEnv};

const DEFAULT_FROM_ADDRESS: &str = "hello@updates.lumiso.app";

/// Sender identity and fixed headers for outgoing template mail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailConfig {
    /// Envelope address; the display name is the business name per send.
    pub from_address: String,
    /// Display name when the organization has no business name.
    pub default_sender_name: String,
    /// Target of the `List-Unsubscribe` header and the footer unsubscribe link.
    pub unsubscribe_address: String,
    /// Value of the `X-Mailer` header.
    pub mailer_name: String,
    /// Subject used when a template arrives with a blank one.
    pub default_subject: String,
}

impl FromEnv for MailConfig {
    /// Reads from environment variables with defaults:
    /// - MAIL_FROM_ADDRESS: hello@updates.lumiso.app
    /// - MAIL_DEFAULT_SENDER_NAME: Lumiso
    /// - MAIL_UNSUBSCRIBE_ADDRESS: the from address
    /// - MAIL_MAILER_NAME: Lumiso Template System
    /// - MAIL_DEFAULT_SUBJECT: Notification
    fn from_env() -> Result<Self, ConfigError> {
        let from_address = env_or_default("MAIL_FROM_ADDRESS", DEFAULT_FROM_ADDRESS);
        let unsubscribe_address = env_or_default("MAIL_UNSUBSCRIBE_ADDRESS", &from_address);

        Ok(Self {
            default_sender_name: env_or_default("MAIL_DEFAULT_SENDER_NAME", "Lumiso"),
            mailer_name: env_or_default("MAIL_MAILER_NAME", "Lumiso Template System"),
            default_subject: env_or_default("MAIL_DEFAULT_SUBJECT", "Notification"),
            from_address,
            unsubscribe_address,
        })
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            default_sender_name: "Lumiso".to_string(),
            unsubscribe_address: DEFAULT_FROM_ADDRESS.to_string(),
            mailer_name: "Lumiso Template System".to_string(),
            default_subject: "Notification".to_string(),
        }
    }
}
