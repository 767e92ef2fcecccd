//! End-to-end rendering of template documents.

use domain_notifications::blocks::{
    FooterBlock, HeaderBlock, RawHtmlBlock, SessionDetailsBlock, SocialLinksBlock, TextBlock,
    TextFormatting,
};
use domain_notifications::{
    BrandingContext, ContentBlock, DataContext, EmailDocument, SocialChannel, TemplateRenderer,
    TrustedHtml,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeMap;

fn text(id: &str, order: i64, content: &str) -> ContentBlock {
    ContentBlock::new(
        id,
        order,
        TextBlock {
            content: content.to_string(),
            ..Default::default()
        },
    )
}

fn booking_document() -> EmailDocument {
    let blocks = vec![
        ContentBlock::new(
            "header",
            0,
            HeaderBlock {
                title: Some("Booking confirmed".to_string()),
                tagline: Some("Thanks, {first_name}!".to_string()),
                show_logo: true,
                background_color: None,
            },
        ),
        text("intro", 1, "Your {session_type} is on {session_date} at {session_time}."),
        ContentBlock::new(
            "details",
            2,
            SessionDetailsBlock {
                show_date: true,
                show_time: true,
                show_location: true,
                show_notes: true,
                ..Default::default()
            },
        ),
        ContentBlock::new(
            "footer",
            3,
            FooterBlock {
                show_business_name: true,
                show_contact_info: true,
                custom_text: Some("Questions? Call {business_phone}".to_string()),
                ..Default::default()
            },
        ),
    ];
    let data = DataContext::new()
        .with("first_name", "Jordan")
        .with("session_type", "Family Portrait")
        .with("session_date", "Saturday, May 3")
        .with("session_time", "")
        .with("session_location", "Studio")
        .with("business_phone", "+90 212 555 0000");
    EmailDocument::new("Booked: {session_date}", blocks, data)
}

#[test]
fn test_rendering_is_deterministic() {
    let renderer = TemplateRenderer::default();
    let document = booking_document();
    let first = renderer.render(&document);
    let second = renderer.render(&document);
    assert_eq!(first.html, second.html);
    assert_eq!(first.text, second.text);
}

#[test]
fn test_blocks_render_in_order_regardless_of_position() {
    let document = EmailDocument::new(
        "s",
        vec![text("late", 2, "SECOND-BLOCK"), text("early", 1, "FIRST-BLOCK")],
        DataContext::new(),
    );
    let rendered = TemplateRenderer::default().render(&document);

    let html_first = rendered.html.find("FIRST-BLOCK").unwrap();
    let html_second = rendered.html.find("SECOND-BLOCK").unwrap();
    assert!(html_first < html_second);
    assert_eq!(rendered.text, "FIRST-BLOCK\n\nSECOND-BLOCK");
}

#[test]
fn test_shared_values_agree_across_formats() {
    let rendered = TemplateRenderer::default().render(&booking_document());

    for expected in [
        "Saturday, May 3",
        "Family Portrait",
        "Thanks, Jordan!",
        "Questions? Call +90 212 555 0000",
    ] {
        assert!(rendered.html.contains(expected), "html missing {expected:?}");
        assert!(rendered.text.contains(expected), "text missing {expected:?}");
    }

    // Empty time falls back identically in both session cards.
    assert!(rendered.html.contains("<span class=\"session-detail-value\">TBD</span>"));
    assert!(rendered.text.contains("Time: TBD"));
    // "Studio" is not worth printing as a location.
    assert!(rendered.html.contains("<span class=\"session-detail-value\">-</span>"));
    assert!(rendered.text.contains("Location: -"));
    // Generic keys with empty values stay visible in the intro line.
    assert!(rendered.html.contains("at {session_time}."));
    assert!(rendered.text.contains("at {session_time}."));
}

#[test]
fn test_full_text_rendering() {
    let rendered = TemplateRenderer::default().render(&booking_document());
    assert_eq!(rendered.subject, "Booked: Saturday, May 3");
    assert_eq!(
        rendered.text,
        "BOOKING CONFIRMED\n\
=================\n\
Thanks, Jordan!\n\
\n\
Your Family Portrait is on Saturday, May 3 at {session_time}.\n\
\n\
Session Details\n\
Date: Saturday, May 3\n\
Time: TBD\n\
Location: -\n\
Notes: —\n\
\n\
---\n\
Your Business\n\
Phone: +90 212 555 0000\n\
Email: hello@yourbusiness.com\n\
Questions? Call +90 212 555 0000"
    );
}

#[test]
fn test_bullets_render_three_items() {
    let document = EmailDocument::new(
        "s",
        vec![ContentBlock::new(
            "list",
            0,
            TextBlock {
                content: "a\nb\n\nc".to_string(),
                formatting: TextFormatting {
                    bullets: true,
                    ..Default::default()
                },
            },
        )],
        DataContext::new(),
    );
    let rendered = TemplateRenderer::default().render(&document);
    assert_eq!(rendered.html.matches("<li>").count(), 3);
    assert!(rendered.html.contains("<li>a</li><li>b</li><li>c</li>"));
    assert_eq!(rendered.text, "- a\n- b\n- c");
}

#[test]
fn test_session_card_without_flags_has_no_rows() {
    let document = EmailDocument::new(
        "s",
        vec![ContentBlock::new("d", 0, SessionDetailsBlock::default())],
        DataContext::new().with("session_date", "May 3"),
    );
    let rendered = TemplateRenderer::default().render(&document);
    assert!(rendered.html.contains("<h3>Session Details</h3></div>"));
    assert!(!rendered.html.contains("session-detail-item\">"));
    assert_eq!(rendered.text, "Session Details");
}

#[test]
fn test_social_links_sorted_and_filtered() {
    let mut channels = BTreeMap::new();
    for (key, url, order) in [
        ("second", "https://two.test", 2),
        ("first", "https://one.test", 1),
        ("blank", "", 0),
    ] {
        channels.insert(
            key.to_string(),
            SocialChannel {
                name: None,
                url: Some(url.to_string()),
                order: Some(order),
            },
        );
    }
    let branding = BrandingContext {
        social_channels: Some(channels),
        ..Default::default()
    };
    let mut social = SocialLinksBlock::default();
    social.channel_visibility.insert("blank".to_string(), true);

    let document = EmailDocument::new(
        "s",
        vec![ContentBlock::new("social", 0, social)],
        DataContext::new(),
    )
    .with_branding(branding);
    let html = TemplateRenderer::default().render(&document).html;

    assert!(html.contains(
        "<div class=\"social-links\"><a href=\"https://one.test\">first</a><a href=\"https://two.test\">second</a></div>"
    ));
    assert!(!html.contains(">blank</a>"));
}

#[test]
fn test_raw_html_passes_through_verbatim() {
    let markup = "<table role=\"presentation\"><tr><td style=\"color:#f00\">{client_name} &amp; co</td></tr></table>";
    let document = EmailDocument::new(
        "s",
        vec![ContentBlock::new(
            "raw",
            0,
            RawHtmlBlock {
                html: TrustedHtml::new(markup),
            },
        )],
        DataContext::new().with("client_name", "Jordan"),
    );
    let rendered = TemplateRenderer::default().render(&document);
    assert!(rendered.html.contains(markup));
    assert_eq!(rendered.text, "");
}

#[test]
fn test_document_decoded_from_wire_json() {
    let document: EmailDocument = serde_json::from_value(json!({
        "subject": "Reminder for {first_name}",
        "preheader": "Your session is coming up",
        "blocks": [
            {"id": "c", "type": "cta", "order": 2, "data": {"text": "Open gallery", "link": "{gallery_url}", "variant": "secondary"}},
            {"id": "x", "type": "countdown", "order": 1, "data": {}},
            {"id": "t", "type": "text", "order": 0, "data": {"content": "Hi {first_name}", "formatting": {"fontSize": "h1", "alignment": "center"}}},
            {"id": "d", "type": "divider", "order": 3, "data": {"style": "line", "color": "#000000"}}
        ],
        "data": {"first_name": "Jordan", "gallery_url": "https://gallery.test/j"},
        "branding": {"businessName": "Lens", "brandColor": "#123456"}
    }))
    .unwrap();

    assert_eq!(document.blocks.len(), 3);

    let rendered = TemplateRenderer::default().render(&document);
    assert_eq!(rendered.subject, "Reminder for Jordan");
    assert!(rendered.html.contains("<title>Reminder for Jordan</title>"));
    assert!(rendered.html.contains("Your session is coming up"));
    assert!(rendered.html.contains("font-size: 32px;"));
    assert!(rendered.html.contains("text-align: center;"));
    assert!(rendered.html.contains(
        "<a href=\"https://gallery.test/j\" class=\"cta-button cta-secondary\">Open gallery</a>"
    ));
    assert!(rendered.html.contains("<hr class=\"divider-line\" style=\"border-color: #000000;\">"));
    assert_eq!(
        rendered.text,
        "Hi Jordan\n\nOpen gallery: https://gallery.test/j"
    );
}

#[test]
fn test_document_shell_wraps_blocks() {
    let rendered = TemplateRenderer::default().render(&EmailDocument::new(
        "Hello",
        vec![text("t", 0, "Body")],
        DataContext::new(),
    ));
    assert!(rendered.html.starts_with("<!DOCTYPE html>"));
    assert!(rendered.html.trim_end().ends_with("</html>"));

    let body = rendered.html.find("<div>Body</div>").unwrap();
    let unsubscribe = rendered.html.find("Unsubscribe</a>").unwrap();
    assert!(body < unsubscribe);
}

#[test]
fn test_null_fields_and_untyped_blocks_still_render() {
    let document: EmailDocument = serde_json::from_value(json!({
        "subject": null,
        "data": null,
        "blocks": [
            {"id": "t", "type": "text", "order": 0, "data": {"content": "Hello", "formatting": null}},
            {"id": "n", "type": "divider", "order": null, "data": {"style": "line"}},
            {"id": "u", "order": 1, "data": {"content": "no type"}},
            {"id": "c", "type": "cta", "order": 2, "data": {"text": "Book", "link": "https://x"}}
        ]
    }))
    .unwrap();

    assert_eq!(document.blocks.len(), 3);

    let rendered = TemplateRenderer::default().render(&document);
    assert!(rendered.html.contains("<div>Hello</div>"));
    assert!(rendered.html.contains("<hr class=\"divider-line\""));
    assert!(!rendered.html.contains("no type"));
    assert_eq!(rendered.text, "Hello\n\nBook: https://x");
}
