//! Sitemap URL entries.

use crate::utils::date::Timestamp;
use serde::{Deserialize, Serialize};

/// `<changefreq>` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// One `<url>` element of a urlset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub loc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<Timestamp>,
    /// Part of the protocol; no section of this job sets it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<ChangeFreq>,
}

impl SitemapEntry {
    /// Entry with only a location (static pages, section landings).
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            priority: None,
            changefreq: None,
        }
    }

    /// Record-backed entry: `lastmod` from the record, `daily` frequency.
    pub fn daily(loc: impl Into<String>, lastmod: Option<Timestamp>) -> Self {
        Self {
            lastmod,
            changefreq: Some(ChangeFreq::Daily),
            ..Self::new(loc)
        }
    }
}
