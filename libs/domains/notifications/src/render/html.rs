//! HTML renderer.
//!
//! Every block type has one render function here. Values are inserted
//! without escaping; `raw-html` is copied through untouched.

use super::fields::{self, RowValue};
use super::{in_render_order, shell, RenderOptions};
use crate::blocks::{
    BlockKind, ContentBlock, CtaBlock, DividerBlock, DividerStyle, FooterBlock, HeaderBlock,
    ImageBlock, SessionDetailsBlock, SocialLinksBlock, TextBlock,
};
use crate::branding::{BrandingContext, DEFAULT_BRAND_COLOR};
use crate::context::{present, DataContext};
use crate::placeholders::resolve;

const DEFAULT_FONT_FAMILY: &str = "Arial";
const HEADER_BACKGROUND: &str = "#ffffff";
const DIVIDER_COLOR: &str = "#e5e7eb";
const DIVIDER_HEIGHT: u32 = 20;

/// Render a complete standalone HTML document.
pub fn render_document(
    blocks: &[ContentBlock],
    context: &DataContext,
    subject: &str,
    preheader: Option<&str>,
    branding: Option<&BrandingContext>,
    options: &RenderOptions,
) -> String {
    let preheader = present(preheader).map(|p| resolve(p, context));
    let mut html = shell::open(subject, preheader.as_deref(), options);

    for block in in_render_order(blocks) {
        html.push_str(&render_block(block, context, branding));
    }

    html.push_str(&shell::close(options));
    html
}

/// Render a single block fragment. Blocks with nothing to show yield `""`.
pub fn render_block(
    block: &ContentBlock,
    context: &DataContext,
    branding: Option<&BrandingContext>,
) -> String {
    match &block.kind {
        BlockKind::Text(text) => render_text(text, context),
        BlockKind::Header(header) => render_header(header, context),
        BlockKind::Cta(cta) => render_cta(cta, context),
        BlockKind::Image(image) => render_image(image, context),
        BlockKind::SessionDetails(session) => render_session_details(session, context, branding),
        BlockKind::Divider(divider) => render_divider(divider),
        BlockKind::SocialLinks(social) => render_social_links(social, branding),
        BlockKind::Footer(footer) => render_footer(footer, context, branding),
        BlockKind::RawHtml(raw) => raw.html.as_str().to_string(),
    }
}

fn render_text(block: &TextBlock, context: &DataContext) -> String {
    let formatting = &block.formatting;
    let metrics = formatting.font_size.unwrap_or_default().metrics();
    let alignment = formatting.alignment.unwrap_or_default();
    let family = font_class(formatting.font_family.as_deref());

    let mut style = format!(
        "text-align: {}; font-size: {}; font-weight: {}; line-height: {}; margin-bottom: {};",
        alignment.as_str(),
        metrics.size,
        metrics.weight,
        metrics.line_height,
        metrics.margin_bottom
    );
    if formatting.bold {
        style.push_str(" font-weight: bold;");
    }
    if formatting.italic {
        style.push_str(" font-style: italic;");
    }

    let content = resolve(&block.content, context);
    let body = if formatting.bullets {
        let items: String = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| format!("<li>{line}</li>"))
            .collect();
        format!("<ul class=\"bullet-list\">{items}</ul>")
    } else {
        content
            .split('\n')
            .map(|line| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                if line.trim().is_empty() {
                    "<div><br></div>".to_string()
                } else {
                    format!("<div>{line}</div>")
                }
            })
            .collect()
    };

    format!("<div class=\"text-block font-{family}\" style=\"{style}\">{body}</div>\n")
}

/// `Times New Roman` → `times`.
fn font_class(family: Option<&str>) -> String {
    present(family)
        .and_then(|f| f.split_whitespace().next())
        .unwrap_or(DEFAULT_FONT_FAMILY)
        .to_lowercase()
}

fn render_header(block: &HeaderBlock, context: &DataContext) -> String {
    let background = present(block.background_color.as_deref()).unwrap_or(HEADER_BACKGROUND);
    let mut html = format!(
        "<div class=\"email-header-block\" style=\"background-color: {background};\">"
    );
    if block.show_logo {
        html.push_str("<div class=\"header-logo\">🏢</div>");
    }
    if let Some(tagline) = fields::header_tagline(block, context) {
        html.push_str(&format!("<p class=\"header-tagline\">{tagline}</p>"));
    }
    html.push_str("</div>\n");
    html
}

fn render_cta(block: &CtaBlock, context: &DataContext) -> String {
    let label = fields::cta_label(block, context);
    let href = fields::cta_href(block, context).unwrap_or_else(|| "#".to_string());
    let variant = block.variant.unwrap_or_default();
    format!(
        "<div style=\"text-align: center; margin: 30px 0;\">\
<a href=\"{href}\" class=\"cta-button cta-{}\">{label}</a></div>\n",
        variant.as_str()
    )
}

fn render_image(block: &ImageBlock, context: &DataContext) -> String {
    let Some(url) = present(block.image_url.as_deref())
        .or_else(|| present(block.src.as_deref()))
        .or_else(|| present(block.placeholder_url.as_deref()))
    else {
        return String::new();
    };

    let caption = fields::image_caption(block, context);
    let caption_html = caption
        .as_deref()
        .map(|c| format!("<div class=\"image-caption\">{c}</div>"))
        .unwrap_or_default();

    if block.placeholder && present(block.src.as_deref()).is_none() {
        return format!(
            "<div class=\"image-block\">\
<div style=\"width: 100%; height: 200px; background-color: #f3f4f6; border: 2px dashed #d1d5db; \
border-radius: 8px; display: flex; align-items: center; justify-content: center; \
color: #6b7280; font-size: 48px;\">🖼️</div>{caption_html}</div>\n"
        );
    }

    let alt = fields::image_alt(block, caption.as_deref(), context);
    format!(
        "<div class=\"image-block\"><img src=\"{url}\" alt=\"{alt}\" \
style=\"max-width: 100%; height: auto; border-radius: 8px;\">{caption_html}</div>\n"
    )
}

fn render_session_details(
    block: &SessionDetailsBlock,
    context: &DataContext,
    branding: Option<&BrandingContext>,
) -> String {
    let brand_color = branding
        .map(BrandingContext::brand_color)
        .unwrap_or(DEFAULT_BRAND_COLOR);

    let mut html = format!(
        "<div class=\"session-details\"><h3>{}</h3>",
        fields::session_heading(block, context)
    );
    for row in fields::session_rows(block, context) {
        let value = match row.value {
            RowValue::Text(text) => text,
            RowValue::Link(url) => format!(
                "<a href=\"{url}\" style=\"color: {brand_color}; text-decoration: underline;\">{url}</a>"
            ),
        };
        html.push_str(&format!(
            "<div class=\"session-detail-item\">\
<span class=\"session-detail-label\">{}:</span>\
<span class=\"session-detail-value\">{value}</span></div>",
            row.label
        ));
    }
    html.push_str("</div>\n");
    html
}

fn render_divider(block: &DividerBlock) -> String {
    match block.style.unwrap_or_default() {
        DividerStyle::Line => {
            let color = present(block.color.as_deref()).unwrap_or(DIVIDER_COLOR);
            format!("<hr class=\"divider-line\" style=\"border-color: {color};\">\n")
        }
        DividerStyle::Space => {
            let height = block.height.filter(|h| *h > 0).unwrap_or(DIVIDER_HEIGHT);
            format!("<div class=\"divider-space\" style=\"height: {height}px;\"></div>\n")
        }
    }
}

fn render_social_links(block: &SocialLinksBlock, branding: Option<&BrandingContext>) -> String {
    let Some(branding) = branding else {
        return String::new();
    };
    let channels = branding.visible_channels(|key| block.is_visible(key));
    if channels.is_empty() {
        return String::new();
    }

    let links: String = channels
        .iter()
        .map(|(key, channel)| {
            format!(
                "<a href=\"{}\">{}</a>",
                channel.url.as_deref().unwrap_or_default(),
                channel.label(key)
            )
        })
        .collect();
    format!("<div class=\"social-links\">{links}</div>\n")
}

fn render_footer(
    block: &FooterBlock,
    context: &DataContext,
    branding: Option<&BrandingContext>,
) -> String {
    let identity = fields::footer_identity(branding, context);
    let mut html = String::from("<div class=\"email-footer\">");

    if block.show_logo {
        match &identity.logo_url {
            Some(logo) => html.push_str(&format!(
                "<img src=\"{logo}\" alt=\"{}\" \
style=\"max-width: 64px; max-height: 64px; margin: 0 auto 12px auto; display: block;\">",
                identity.name
            )),
            None => {
                let monogram: String = identity.name.chars().take(1).collect();
                html.push_str(&format!("<div class=\"footer-logo\">{monogram}</div>"));
            }
        }
    }
    if block.show_business_name {
        html.push_str(&format!(
            "<div class=\"footer-business-name\">{}</div>",
            identity.name
        ));
    }
    if block.show_contact_info {
        html.push_str(&format!(
            "<div class=\"footer-contact\">{}</div><div class=\"footer-contact\">{}</div>",
            identity.phone, identity.email
        ));
    }
    if let Some(text) = fields::resolve_optional(&block.custom_text, context) {
        html.push_str(&format!("<div class=\"footer-custom-text\">{text}</div>"));
    }

    html.push_str("</div>\n");
    html
}
