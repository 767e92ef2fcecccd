//! Block renderers.
//!
//! [`html`] and [`text`] are two independent per-block renderers. They share
//! the placeholder resolver and the literal fallbacks in `fields`, nothing
//! else. Both are pure: the same input always produces the same bytes.

pub mod html;
pub mod text;

mod fields;
mod shell;

use crate::blocks::{deserialize_blocks, null_as_default, ContentBlock};
use crate::branding::BrandingContext;
use crate::context::DataContext;
use crate::placeholders::resolve;
use core_config::MailConfig;
use serde::Deserialize;
use tracing::debug;

/// Document-level settings that are not part of the template itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Adds the browser-style preview bar above the body.
    pub preview: bool,
    /// Name in the trailing "This email was sent by ..." line.
    pub sender_label: String,
    /// Mailbox the trailing unsubscribe link points at.
    pub unsubscribe_address: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_mail_config(&MailConfig::default())
    }
}

impl RenderOptions {
    pub fn from_mail_config(config: &MailConfig) -> Self {
        Self {
            preview: false,
            sender_label: config.default_sender_name.clone(),
            unsubscribe_address: config.unsubscribe_address.clone(),
        }
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }
}

/// Both renderings of one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Everything needed to render one message.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default)]
    pub preheader: Option<String>,
    #[serde(default, deserialize_with = "deserialize_blocks")]
    pub blocks: Vec<ContentBlock>,
    #[serde(default, alias = "mockData", deserialize_with = "null_as_default")]
    pub data: DataContext,
    #[serde(default, alias = "organizationSettings")]
    pub branding: Option<BrandingContext>,
}

impl EmailDocument {
    pub fn new(subject: impl Into<String>, blocks: Vec<ContentBlock>, data: DataContext) -> Self {
        Self {
            subject: subject.into(),
            preheader: None,
            blocks,
            data,
            branding: None,
        }
    }

    pub fn with_preheader(mut self, preheader: impl Into<String>) -> Self {
        self.preheader = Some(preheader.into());
        self
    }

    pub fn with_branding(mut self, branding: BrandingContext) -> Self {
        self.branding = Some(branding);
        self
    }
}

/// Renders [`EmailDocument`]s into HTML and plain text.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    options: RenderOptions,
}

impl TemplateRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(&self, document: &EmailDocument) -> RenderedEmail {
        let branding = document.branding.as_ref();
        let subject = resolve(&document.subject, &document.data);

        let html = html::render_document(
            &document.blocks,
            &document.data,
            &subject,
            document.preheader.as_deref(),
            branding,
            &self.options,
        );
        let text = text::render_document(&document.blocks, &document.data, branding);

        debug!(
            blocks = document.blocks.len(),
            html_len = html.len(),
            text_len = text.len(),
            "Rendered template"
        );

        RenderedEmail {
            subject,
            html,
            text,
        }
    }
}

/// Blocks in ascending `order`; equal orders keep their input position.
pub(crate) fn in_render_order(blocks: &[ContentBlock]) -> Vec<&ContentBlock> {
    let mut ordered: Vec<&ContentBlock> = blocks.iter().collect();
    ordered.sort_by_key(|block| block.order);
    ordered
}
