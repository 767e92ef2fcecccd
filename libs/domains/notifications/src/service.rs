//! Template mail service.
//!
//! Ties the pieces together for one outgoing message: validate the request,
//! consult the messaging guard, render both formats, then hand the message
//! to the configured [`EmailProvider`].

use crate::error::{NotificationError, NotificationResult};
use crate::guard::MessagingGuard;
use crate::providers::{EmailProvider, OutgoingEmail};
use crate::render::{EmailDocument, RenderOptions, RenderedEmail, TemplateRenderer};
use core_config::MailConfig;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::ValidateEmail;

/// One template send.
#[derive(Debug, Clone)]
pub struct SendTemplateRequest {
    pub to: String,
    pub document: EmailDocument,
    /// When set, the messaging guard is consulted before rendering.
    pub organization_id: Option<String>,
    pub template_id: Option<String>,
    pub workflow_execution_id: Option<String>,
}

impl SendTemplateRequest {
    pub fn new(to: impl Into<String>, document: EmailDocument) -> Self {
        Self {
            to: to.into(),
            document,
            organization_id: None,
            template_id: None,
            workflow_execution_id: None,
        }
    }

    pub fn for_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn with_template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    pub fn with_workflow_execution_id(mut self, execution_id: impl Into<String>) -> Self {
        self.workflow_execution_id = Some(execution_id.into());
        self
    }
}

/// What happened to a send request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent {
        message_id: String,
        rendered: RenderedEmail,
    },
    /// The organization is blocked from messaging; nothing was rendered.
    Skipped { reason: String },
}

/// Renders and delivers template mail.
pub struct TemplateMailer {
    provider: Arc<dyn EmailProvider>,
    guard: Option<Arc<MessagingGuard>>,
    renderer: TemplateRenderer,
    config: MailConfig,
}

impl TemplateMailer {
    pub fn new(provider: Arc<dyn EmailProvider>, config: MailConfig) -> Self {
        Self {
            provider,
            guard: None,
            renderer: TemplateRenderer::new(RenderOptions::from_mail_config(&config)),
            config,
        }
    }

    pub fn with_guard(mut self, guard: Arc<MessagingGuard>) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    #[instrument(skip(self, request), fields(to = %request.to, provider = self.provider.name()))]
    pub async fn send(&self, request: SendTemplateRequest) -> NotificationResult<SendOutcome> {
        validate_email(&request.to)?;
        if request.document.blocks.is_empty() {
            return Err(NotificationError::InvalidInput(
                "template has no renderable blocks".to_string(),
            ));
        }

        if let (Some(guard), Some(organization_id)) = (&self.guard, &request.organization_id) {
            let decision = guard.check(organization_id).await;
            if decision.hard_blocked {
                let reason = decision
                    .reason
                    .unwrap_or_else(|| "messaging blocked".to_string());
                warn!(organization_id = %organization_id, reason = %reason, "Skipping send for blocked organization");
                return Ok(SendOutcome::Skipped { reason });
            }
        }

        let mut document = request.document.clone();
        if document.subject.trim().is_empty() {
            document.subject = self.config.default_subject.clone();
        }

        let rendered = self.renderer.render(&document);
        let email = self.build_email(&request, &document, &rendered);
        let sent = self.provider.send(&email).await?;

        info!(
            message_id = %sent.message_id,
            subject = %rendered.subject,
            template_id = request.template_id.as_deref().unwrap_or_default(),
            "Template email sent"
        );

        Ok(SendOutcome::Sent {
            message_id: sent.message_id,
            rendered,
        })
    }

    /// Outgoing message for an already rendered document.
    pub fn build_email(
        &self,
        request: &SendTemplateRequest,
        document: &EmailDocument,
        rendered: &RenderedEmail,
    ) -> OutgoingEmail {
        let branding = document.branding.as_ref();
        let sender_name = branding
            .and_then(|b| b.business_name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.config.default_sender_name.as_str());
        let reply_to = branding
            .and_then(|b| b.email.as_deref())
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .unwrap_or(self.config.from_address.as_str());

        let mut headers = BTreeMap::new();
        headers.insert(
            "List-Unsubscribe".to_string(),
            format!("<mailto:{}?subject=unsubscribe>", self.config.unsubscribe_address),
        );
        headers.insert(
            "List-Unsubscribe-Post".to_string(),
            "List-Unsubscribe=One-Click".to_string(),
        );
        headers.insert("X-Mailer".to_string(), self.config.mailer_name.clone());
        headers.insert("X-Priority".to_string(), "3".to_string());
        headers.insert("X-Auto-Response-Suppress".to_string(), "OOF".to_string());
        if let Some(template_id) = &request.template_id {
            headers.insert("X-Template-ID".to_string(), template_id.clone());
        }
        if let Some(execution_id) = &request.workflow_execution_id {
            headers.insert("X-Workflow-Execution".to_string(), execution_id.clone());
        }

        OutgoingEmail {
            from: format!("{sender_name} <{}>", self.config.from_address),
            to: request.to.trim().to_string(),
            reply_to: Some(reply_to.to_string()),
            subject: rendered.subject.clone(),
            html: rendered.html.clone(),
            text: rendered.text.clone(),
            headers,
        }
    }
}

fn validate_email(address: &str) -> NotificationResult<()> {
    let address = address.trim();
    if address.validate_email() {
        Ok(())
    } else {
        Err(NotificationError::InvalidEmail(address.to_string()))
    }
}
