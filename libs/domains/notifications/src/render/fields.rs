//! Literal fallbacks and resolved field values shared by both renderers.
//!
//! The HTML and plain-text renderers are written separately, but any value
//! that shows up in both formats is computed here so the two can never
//! disagree on it.

use crate::blocks::{CtaBlock, HeaderBlock, ImageBlock, SessionDetailsBlock};
use crate::branding::BrandingContext;
use crate::context::{non_blank, present, DataContext};
use crate::placeholders::{resolve, resolve_key};

/// Shown for a session detail with no value.
pub(crate) const NO_VALUE: &str = "—";
/// Shown for an unscheduled session date or time.
pub(crate) const UNSCHEDULED: &str = "TBD";

const SESSION_HEADING: &str = "Session Details";
const CTA_LABEL: &str = "Click Here";
const IMAGE_ALT: &str = "Image";
const BUSINESS_NAME: &str = "Your Business";
const BUSINESS_PHONE: &str = "+1 (555) 123-4567";

pub(crate) enum RowValue {
    Text(String),
    /// Meeting URL, rendered clickable in HTML.
    Link(String),
}

pub(crate) struct SessionRow {
    pub label: String,
    pub value: RowValue,
}

pub(crate) fn session_heading(block: &SessionDetailsBlock, context: &DataContext) -> String {
    non_blank(block.custom_label.as_deref())
        .map(|label| resolve(label, context))
        .unwrap_or_else(|| SESSION_HEADING.to_string())
}

/// Enabled rows in their fixed display order, notes last.
pub(crate) fn session_rows(block: &SessionDetailsBlock, context: &DataContext) -> Vec<SessionRow> {
    let mut rows = Vec::new();
    let mut push = |shown: bool, label: &str, key: &str, fallback: &str| {
        if shown {
            rows.push(SessionRow {
                label: label.to_string(),
                value: RowValue::Text(resolve_key(key, fallback, context)),
            });
        }
    };

    push(block.show_name, "Session", "session_name", NO_VALUE);
    push(block.show_type, "Type", "session_type", NO_VALUE);
    push(block.show_duration, "Duration", "session_duration", NO_VALUE);
    push(block.show_status, "Status", "session_status", NO_VALUE);
    push(block.show_date, "Date", "session_date", UNSCHEDULED);
    push(block.show_time, "Time", "session_time", UNSCHEDULED);
    push(block.show_location, "Location", "session_location", NO_VALUE);

    if block.show_meeting_link {
        let value = match context.get_non_blank("session_meeting_url") {
            Some(url) => RowValue::Link(url.to_string()),
            None => RowValue::Text(NO_VALUE.to_string()),
        };
        rows.push(SessionRow {
            label: label_or(&block.meeting_label, "Meeting Link"),
            value,
        });
    }
    if block.show_project {
        rows.push(SessionRow {
            label: label_or(&block.project_label, "Project"),
            value: RowValue::Text(resolve_key("project_name", NO_VALUE, context)),
        });
    }
    if block.show_package {
        rows.push(SessionRow {
            label: label_or(&block.package_label, "Package"),
            value: RowValue::Text(resolve_key("project_package_name", NO_VALUE, context)),
        });
    }
    if block.show_notes {
        rows.push(SessionRow {
            label: "Notes".to_string(),
            value: RowValue::Text(session_notes(block, context)),
        });
    }

    rows
}

fn label_or(custom: &Option<String>, default: &str) -> String {
    non_blank(custom.as_deref())
        .map(|label| label.trim().to_string())
        .unwrap_or_else(|| default.to_string())
}

fn session_notes(block: &SessionDetailsBlock, context: &DataContext) -> String {
    if let Some(notes) = non_blank(block.custom_notes.as_deref()) {
        return resolve(notes, context);
    }
    context
        .get_non_blank("session_notes")
        .unwrap_or(NO_VALUE)
        .to_string()
}

pub(crate) fn cta_label(block: &CtaBlock, context: &DataContext) -> String {
    resolve(present(block.text.as_deref()).unwrap_or(CTA_LABEL), context)
}

/// Resolved `link`, else resolved `url`.
pub(crate) fn cta_href(block: &CtaBlock, context: &DataContext) -> Option<String> {
    present(block.link.as_deref())
        .or_else(|| present(block.url.as_deref()))
        .map(|target| resolve(target, context))
}

pub(crate) fn header_tagline(block: &HeaderBlock, context: &DataContext) -> Option<String> {
    present(block.tagline.as_deref()).map(|tagline| resolve(tagline, context))
}

pub(crate) fn header_title(block: &HeaderBlock, context: &DataContext) -> Option<String> {
    non_blank(block.title.as_deref()).map(|title| resolve(title, context))
}

pub(crate) fn image_caption(block: &ImageBlock, context: &DataContext) -> Option<String> {
    present(block.caption.as_deref()).map(|caption| resolve(caption, context))
}

pub(crate) fn image_alt(block: &ImageBlock, caption: Option<&str>, context: &DataContext) -> String {
    match present(block.alt.as_deref()) {
        Some(alt) => resolve(alt, context),
        None => caption.unwrap_or(IMAGE_ALT).to_string(),
    }
}

pub(crate) fn resolve_optional(text: &Option<String>, context: &DataContext) -> Option<String> {
    present(text.as_deref()).map(|text| resolve(text, context))
}

/// Business identity printed by footers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FooterIdentity {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub logo_url: Option<String>,
}

/// Branding first, then the matching context key, then a fixed default.
pub(crate) fn footer_identity(
    branding: Option<&BrandingContext>,
    context: &DataContext,
) -> FooterIdentity {
    let name = branded(branding, |b| b.business_name.as_deref())
        .or_else(|| context.get("business_name").map(str::to_string))
        .unwrap_or_else(|| BUSINESS_NAME.to_string());
    let phone = branded(branding, |b| b.phone.as_deref())
        .or_else(|| context.get("business_phone").map(str::to_string))
        .unwrap_or_else(|| BUSINESS_PHONE.to_string());
    let email = branded(branding, |b| b.email.as_deref())
        .or_else(|| context.get("business_email").map(str::to_string))
        .unwrap_or_else(|| {
            let slug: String = name.split_whitespace().collect::<String>().to_lowercase();
            format!("hello@{slug}.com")
        });
    let logo_url = branded(branding, |b| b.logo_url.as_deref());

    FooterIdentity {
        name,
        phone,
        email,
        logo_url,
    }
}

fn branded(
    branding: Option<&BrandingContext>,
    field: impl Fn(&BrandingContext) -> Option<&str>,
) -> Option<String> {
    branding.and_then(|b| non_blank(field(b))).map(str::to_string)
}
