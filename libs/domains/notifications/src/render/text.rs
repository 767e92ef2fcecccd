//! Plain-text renderer.
//!
//! Only text, header, cta, session-details and footer blocks have a text
//! form. Everything else is skipped. Blocks are separated by a blank line.

use super::fields::{self, RowValue};
use super::in_render_order;
use crate::blocks::{BlockKind, ContentBlock, CtaBlock, FooterBlock, HeaderBlock, SessionDetailsBlock, TextBlock};
use crate::branding::BrandingContext;
use crate::context::DataContext;
use crate::placeholders::resolve;

/// Render the plain-text body.
pub fn render_document(
    blocks: &[ContentBlock],
    context: &DataContext,
    branding: Option<&BrandingContext>,
) -> String {
    in_render_order(blocks)
        .into_iter()
        .filter_map(|block| render_block(block, context, branding))
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Text form of one block, or `None` for types without one.
pub fn render_block(
    block: &ContentBlock,
    context: &DataContext,
    branding: Option<&BrandingContext>,
) -> Option<String> {
    match &block.kind {
        BlockKind::Text(text) => Some(render_text(text, context)),
        BlockKind::Header(header) => render_header(header, context),
        BlockKind::Cta(cta) => Some(render_cta(cta, context)),
        BlockKind::SessionDetails(session) => Some(render_session_details(session, context)),
        BlockKind::Footer(footer) => Some(render_footer(footer, context, branding)),
        BlockKind::Image(_)
        | BlockKind::Divider(_)
        | BlockKind::SocialLinks(_)
        | BlockKind::RawHtml(_) => None,
    }
}

fn render_text(block: &TextBlock, context: &DataContext) -> String {
    let content = resolve(&block.content, context);
    if !block.formatting.bullets {
        return content;
    }
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_header(block: &HeaderBlock, context: &DataContext) -> Option<String> {
    let title = fields::header_title(block, context);
    let tagline = fields::header_tagline(block, context);

    let mut lines = Vec::new();
    if let Some(title) = title {
        let title = title.trim().to_uppercase();
        lines.push("=".repeat(title.chars().count()));
        lines.insert(0, title);
    }
    if let Some(tagline) = tagline {
        lines.push(tagline);
    }

    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn render_cta(block: &CtaBlock, context: &DataContext) -> String {
    let label = fields::cta_label(block, context);
    match fields::cta_href(block, context) {
        Some(href) => format!("{label}: {href}"),
        None => label,
    }
}

fn render_session_details(block: &SessionDetailsBlock, context: &DataContext) -> String {
    let mut lines = vec![fields::session_heading(block, context)];
    for row in fields::session_rows(block, context) {
        let value = match row.value {
            RowValue::Text(value) | RowValue::Link(value) => value,
        };
        lines.push(format!("{}: {value}", row.label));
    }
    lines.join("\n")
}

fn render_footer(
    block: &FooterBlock,
    context: &DataContext,
    branding: Option<&BrandingContext>,
) -> String {
    let identity = fields::footer_identity(branding, context);
    let mut lines = vec!["---".to_string()];

    if block.show_business_name {
        lines.push(identity.name);
    }
    if block.show_contact_info {
        lines.push(format!("Phone: {}", identity.phone));
        lines.push(format!("Email: {}", identity.email));
    }
    if let Some(text) = fields::resolve_optional(&block.custom_text, context) {
        lines.push(text);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{DividerBlock, ImageBlock, RawHtmlBlock, TextFormatting, TrustedHtml};
    use pretty_assertions::assert_eq;

    fn text_block(order: i64, content: &str) -> ContentBlock {
        ContentBlock::new(
            format!("t{order}"),
            order,
            TextBlock {
                content: content.to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_blocks_joined_by_blank_line() {
        let blocks = vec![text_block(2, "second"), text_block(1, "first")];
        assert_eq!(
            render_document(&blocks, &DataContext::new(), None),
            "first\n\nsecond"
        );
    }

    #[test]
    fn test_unsupported_blocks_are_skipped() {
        let blocks = vec![
            text_block(0, "only"),
            ContentBlock::new("d", 1, DividerBlock::default()),
            ContentBlock::new(
                "i",
                2,
                ImageBlock {
                    src: Some("a.png".to_string()),
                    ..Default::default()
                },
            ),
            ContentBlock::new(
                "r",
                3,
                RawHtmlBlock {
                    html: TrustedHtml::new("<b>x</b>"),
                },
            ),
        ];
        assert_eq!(render_document(&blocks, &DataContext::new(), None), "only");
    }

    #[test]
    fn test_bullets_prefixed() {
        let block = TextBlock {
            content: "a\nb\n\nc".to_string(),
            formatting: TextFormatting {
                bullets: true,
                ..Default::default()
            },
        };
        assert_eq!(render_text(&block, &DataContext::new()), "- a\n- b\n- c");
    }

    #[test]
    fn test_header_title_and_tagline() {
        let header = HeaderBlock {
            title: Some("Welcome".to_string()),
            tagline: Some("Hi {name}".to_string()),
            ..Default::default()
        };
        let context = DataContext::new().with("name", "Ada");
        assert_eq!(
            render_header(&header, &context).as_deref(),
            Some("WELCOME\n=======\nHi Ada")
        );
        assert_eq!(render_header(&HeaderBlock::default(), &context), None);
    }

    #[test]
    fn test_cta_with_and_without_target() {
        let mut cta = CtaBlock {
            text: Some("Book now".to_string()),
            link: Some("https://book.test".to_string()),
            ..Default::default()
        };
        assert_eq!(render_cta(&cta, &DataContext::new()), "Book now: https://book.test");
        cta.link = None;
        assert_eq!(render_cta(&cta, &DataContext::new()), "Book now");
    }

    #[test]
    fn test_session_details_rows() {
        let session = SessionDetailsBlock {
            show_date: true,
            show_location: true,
            show_meeting_link: true,
            ..Default::default()
        };
        let context = DataContext::new()
            .with("session_date", "May 3")
            .with("session_location", "Studio")
            .with("session_meeting_url", "https://meet.test/x");
        assert_eq!(
            render_session_details(&session, &context),
            "Session Details\nDate: May 3\nLocation: -\nMeeting Link: https://meet.test/x"
        );
    }

    #[test]
    fn test_footer_lines() {
        let footer = FooterBlock {
            show_business_name: true,
            show_contact_info: true,
            custom_text: Some("Thanks!".to_string()),
            ..Default::default()
        };
        let branding = BrandingContext {
            business_name: Some("Lens".to_string()),
            phone: Some("+90 555".to_string()),
            email: Some("hi@lens.test".to_string()),
            ..Default::default()
        };
        assert_eq!(
            render_footer(&footer, &DataContext::new(), Some(&branding)),
            "---\nLens\nPhone: +90 555\nEmail: hi@lens.test\nThanks!"
        );
    }
}
