//! Organization branding merged into renders.
//!
//! Owned by the organization settings collaborator; the renderer only reads it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Visual identity and contact details of the sending organization.
///
/// Field aliases accept the column names of the organization settings row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandingContext {
    #[serde(alias = "photography_business_name", alias = "business_name")]
    pub business_name: Option<String>,
    #[serde(alias = "primary_brand_color")]
    pub brand_color: Option<String>,
    #[serde(alias = "logo_url")]
    pub logo_url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Keyed by channel id (`instagram`, `facebook`, ...). A `BTreeMap` so
    /// equal `order` values still render in a stable sequence.
    #[serde(alias = "social_channels")]
    pub social_channels: Option<BTreeMap<String, SocialChannel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialChannel {
    pub name: Option<String>,
    pub url: Option<String>,
    pub order: Option<i64>,
}

/// Link color when the organization has not picked one.
pub const DEFAULT_BRAND_COLOR: &str = "#2563eb";

impl BrandingContext {
    pub fn brand_color(&self) -> &str {
        self.brand_color
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_BRAND_COLOR)
    }

    /// Channels worth linking: non-blank URL and not hidden by `is_visible`,
    /// sorted by `order` (missing = 0), ties in key order.
    pub fn visible_channels<'a>(
        &'a self,
        is_visible: impl Fn(&str) -> bool,
    ) -> Vec<(&'a str, &'a SocialChannel)> {
        let Some(channels) = &self.social_channels else {
            return Vec::new();
        };
        let mut visible: Vec<_> = channels
            .iter()
            .filter(|(key, channel)| {
                channel.url.as_deref().is_some_and(|u| !u.trim().is_empty()) && is_visible(key.as_str())
            })
            .map(|(key, channel)| (key.as_str(), channel))
            .collect();
        visible.sort_by_key(|(_, channel)| channel.order.unwrap_or(0));
        visible
    }
}

impl SocialChannel {
    /// Display name, falling back to the channel key.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(key)
    }
}
