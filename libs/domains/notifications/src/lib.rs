//! Notifications Domain
//!
//! Block-based template email rendering and delivery.
//!
//! # Features
//!
//! - Placeholder substitution with `{key}` / `{key|fallback}` tokens
//! - Nine block types rendered to a standalone HTML document
//! - Plain-text rendering that agrees with the HTML on every resolved value
//! - Resend delivery with the standard bulk-mail headers
//! - Per-organization messaging guard with cached, coalesced lookups
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ EmailDocument   │  ← blocks + data context + branding
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ TemplateMailer  │  ← validates, consults MessagingGuard
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │TemplateRenderer │  ← html::render_document + text::render_document
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ Email Provider  │  ← Resend, mock
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_notifications::{EmailDocument, TemplateRenderer};
//!
//! let document: EmailDocument = serde_json::from_str(&json)?;
//! let rendered = TemplateRenderer::default().render(&document);
//! println!("{}", rendered.text);
//! ```

pub mod blocks;
pub mod branding;
pub mod context;
pub mod error;
pub mod guard;
pub mod placeholders;
pub mod providers;
pub mod render;
pub mod service;

// Re-export commonly used types
pub use blocks::{BlockKind, ContentBlock, RawBlock, TrustedHtml};
pub use branding::{BrandingContext, SocialChannel};
pub use context::DataContext;
pub use error::{NotificationError, NotificationResult};
pub use guard::{GuardConfig, GuardDecision, MembershipSource, MessagingGuard};
pub use placeholders::resolve;
pub use providers::{
    EmailProvider, MockEmailProvider, OutgoingEmail, ResendConfig, ResendProvider, SentEmail,
};
pub use render::{EmailDocument, RenderOptions, RenderedEmail, TemplateRenderer};
pub use service::{SendOutcome, SendTemplateRequest, TemplateMailer};
