//! Block model for template emails.
//!
//! A template is an ordered list of [`ContentBlock`]s. On the wire each block
//! is `{id, type, order, data}` with a camelCase payload in `data`; that shape
//! is decoded through [`RawBlock`], which drops untyped, unknown or malformed
//! blocks instead of failing the whole template. Explicit `null`s in a payload
//! read as the field's default.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// One renderable unit of an email.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    pub id: String,
    /// Render position. Not unique; ties keep input order.
    pub order: i64,
    pub kind: BlockKind,
}

impl ContentBlock {
    pub fn new(id: impl Into<String>, order: i64, kind: impl Into<BlockKind>) -> Self {
        Self {
            id: id.into(),
            order,
            kind: kind.into(),
        }
    }
}

/// The closed set of block types with their payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Text(TextBlock),
    Header(HeaderBlock),
    Cta(CtaBlock),
    Image(ImageBlock),
    SessionDetails(SessionDetailsBlock),
    Divider(DividerBlock),
    SocialLinks(SocialLinksBlock),
    Footer(FooterBlock),
    RawHtml(RawHtmlBlock),
}

impl BlockKind {
    /// Wire name of the block type.
    pub fn type_name(&self) -> &'static str {
        match self {
            BlockKind::Text(_) => "text",
            BlockKind::Header(_) => "header",
            BlockKind::Cta(_) => "cta",
            BlockKind::Image(_) => "image",
            BlockKind::SessionDetails(_) => "session-details",
            BlockKind::Divider(_) => "divider",
            BlockKind::SocialLinks(_) => "social-links",
            BlockKind::Footer(_) => "footer",
            BlockKind::RawHtml(_) => "raw-html",
        }
    }

    /// Decode a payload for the given wire type.
    ///
    /// `Ok(None)` for an unknown type; `Err` when the payload does not fit.
    pub fn from_wire(
        block_type: &str,
        data: serde_json::Value,
    ) -> Result<Option<Self>, serde_json::Error> {
        let data = match data {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };
        let kind = match block_type {
            "text" => BlockKind::Text(serde_json::from_value(data)?),
            "header" => BlockKind::Header(serde_json::from_value(data)?),
            "cta" => BlockKind::Cta(serde_json::from_value(data)?),
            "image" => BlockKind::Image(serde_json::from_value(data)?),
            "session-details" => BlockKind::SessionDetails(serde_json::from_value(data)?),
            "divider" => BlockKind::Divider(serde_json::from_value(data)?),
            "social-links" => BlockKind::SocialLinks(serde_json::from_value(data)?),
            "footer" => BlockKind::Footer(serde_json::from_value(data)?),
            "raw-html" => BlockKind::RawHtml(serde_json::from_value(data)?),
            _ => return Ok(None),
        };
        Ok(Some(kind))
    }
}

macro_rules! impl_from_payload {
    ($($payload:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$payload> for BlockKind {
                fn from(payload: $payload) -> Self {
                    BlockKind::$variant(payload)
                }
            }
        )*
    };
}

impl_from_payload!(
    TextBlock => Text,
    HeaderBlock => Header,
    CtaBlock => Cta,
    ImageBlock => Image,
    SessionDetailsBlock => SessionDetails,
    DividerBlock => Divider,
    SocialLinksBlock => SocialLinks,
    FooterBlock => Footer,
    RawHtmlBlock => RawHtml,
);

/// A block exactly as it arrives on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub block_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i64,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl RawBlock {
    /// Convert into a typed block. Untyped blocks, unknown types and
    /// undecodable payloads are logged and dropped.
    pub fn into_block(self) -> Option<ContentBlock> {
        let Some(block_type) = self.block_type else {
            warn!(block_id = %self.id, "Skipping block without a type");
            return None;
        };
        match BlockKind::from_wire(&block_type, self.data) {
            Ok(Some(kind)) => Some(ContentBlock {
                id: self.id,
                order: self.order,
                kind,
            }),
            Ok(None) => {
                warn!(block_id = %self.id, block_type = %block_type, "Skipping block of unknown type");
                None
            }
            Err(e) => {
                warn!(block_id = %self.id, block_type = %block_type, error = %e, "Skipping block with malformed payload");
                None
            }
        }
    }
}

/// Decode a list of wire blocks, keeping only the ones that convert.
pub fn decode_blocks(raw: Vec<RawBlock>) -> Vec<ContentBlock> {
    raw.into_iter().filter_map(RawBlock::into_block).collect()
}

/// `deserialize_with` helper for fields holding a block list.
///
/// Each entry is decoded on its own, so one malformed block never costs the
/// rest of the list. A `null` list is empty.
pub fn deserialize_blocks<'de, D>(deserializer: D) -> Result<Vec<ContentBlock>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let raw = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<RawBlock>(entry) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(index, error = %e, "Skipping undecodable block");
                None
            }
        })
        .collect();
    Ok(decode_blocks(raw))
}

/// `deserialize_with` helper that reads an explicit `null` as the default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Payloads
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub formatting: TextFormatting,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextFormatting {
    pub alignment: Option<Alignment>,
    pub font_family: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub bold: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub italic: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub bullets: bool,
    pub font_size: Option<FontSize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

impl From<String> for Alignment {
    fn from(value: String) -> Self {
        match value.as_str() {
            "center" => Alignment::Center,
            "right" => Alignment::Right,
            _ => Alignment::Left,
        }
    }
}

/// Semantic text size. Unknown values read as paragraph text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum FontSize {
    H1,
    H2,
    H3,
    #[default]
    P,
}

/// CSS values a [`FontSize`] expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub size: &'static str,
    pub weight: &'static str,
    pub line_height: &'static str,
    pub margin_bottom: &'static str,
}

impl FontSize {
    pub fn metrics(&self) -> FontMetrics {
        match self {
            FontSize::H1 => FontMetrics {
                size: "32px",
                weight: "bold",
                line_height: "1.2",
                margin_bottom: "20px",
            },
            FontSize::H2 => FontMetrics {
                size: "24px",
                weight: "bold",
                line_height: "1.3",
                margin_bottom: "18px",
            },
            FontSize::H3 => FontMetrics {
                size: "20px",
                weight: "bold",
                line_height: "1.4",
                margin_bottom: "16px",
            },
            FontSize::P => FontMetrics {
                size: "16px",
                weight: "normal",
                line_height: "1.6",
                margin_bottom: "16px",
            },
        }
    }
}

impl From<String> for FontSize {
    fn from(value: String) -> Self {
        match value.as_str() {
            "h1" => FontSize::H1,
            "h2" => FontSize::H2,
            "h3" => FontSize::H3,
            _ => FontSize::P,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderBlock {
    /// Kept for compatibility; only the plain-text renderer prints it.
    pub title: Option<String>,
    pub tagline: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub show_logo: bool,
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtaBlock {
    pub text: Option<String>,
    pub link: Option<String>,
    /// Older templates store the target here instead of `link`.
    pub url: Option<String>,
    pub variant: Option<CtaVariant>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum CtaVariant {
    #[default]
    Primary,
    Secondary,
    Text,
}

impl CtaVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            CtaVariant::Primary => "primary",
            CtaVariant::Secondary => "secondary",
            CtaVariant::Text => "text",
        }
    }
}

impl From<String> for CtaVariant {
    fn from(value: String) -> Self {
        match value.as_str() {
            "secondary" => CtaVariant::Secondary,
            "text" => CtaVariant::Text,
            _ => CtaVariant::Primary,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageBlock {
    pub image_url: Option<String>,
    pub src: Option<String>,
    pub placeholder_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub placeholder: bool,
    pub alt: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionDetailsBlock {
    pub custom_label: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub show_name: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_type: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_duration: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_status: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_date: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_time: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_location: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_meeting_link: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_project: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_package: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_notes: bool,
    pub custom_notes: Option<String>,
    pub meeting_label: Option<String>,
    pub project_label: Option<String>,
    pub package_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerBlock {
    pub style: Option<DividerStyle>,
    pub color: Option<String>,
    pub height: Option<u32>,
}

/// Anything other than `line` renders as blank space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DividerStyle {
    Line,
    #[default]
    Space,
}

impl From<String> for DividerStyle {
    fn from(value: String) -> Self {
        if value == "line" {
            DividerStyle::Line
        } else {
            DividerStyle::Space
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLinksBlock {
    /// Channel key → visible. Missing keys are visible.
    #[serde(deserialize_with = "null_as_default")]
    pub channel_visibility: HashMap<String, bool>,
}

impl SocialLinksBlock {
    pub fn is_visible(&self, channel: &str) -> bool {
        self.channel_visibility.get(channel) != Some(&false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub show_logo: bool,
    #[serde(
        rename = "showStudioName",
        alias = "showBusinessName",
        deserialize_with = "null_as_default"
    )]
    pub show_business_name: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_contact_info: bool,
    pub custom_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawHtmlBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub html: TrustedHtml,
}

/// Markup the caller vouches for. Emitted byte-for-byte, never escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
