//! `[site]` section configuration.
//!
//! ```toml
//! [site]
//! url = "https://shop.example"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Front-end origin every sitemap URL is built from.
    pub url: Option<String>,
}

impl SiteSectionConfig {
    pub const URL: FieldPath = FieldPath::new("site.url");

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `url` is set
    /// - `url` is an absolute http(s) URL with a host
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let Some(url_str) = &self.url else {
            diag.error_with_hint(
                Self::URL,
                "front-end URL is not configured",
                format!("set {} or pass --site-url, e.g.: \"https://shop.example\"", Self::URL),
            );
            return;
        };

        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        Self::URL,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://shop.example",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        Self::URL,
                        "URL must have a valid host",
                        "use format like https://shop.example",
                    );
                }
                if parsed.query().is_some() || parsed.fragment().is_some() {
                    diag.error(Self::URL, "URL must not contain a query or fragment");
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::URL,
                    format!("invalid URL: {e}"),
                    "use format like https://shop.example",
                );
            }
        }
    }
}
