//! `[pages]` section configuration.
//!
//! Static front-end pages, relative to `[site] url`. An empty string is the
//! front page itself.
//!
//! ```toml
//! [pages]
//! paths = ["", "help", "help/about", "vacancies"]
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::job::DEFAULT_PAGES;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    pub paths: Vec<String>,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            paths: DEFAULT_PAGES.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

impl PagesConfig {
    pub const PATHS: FieldPath = FieldPath::new("pages.paths");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for path in &self.paths {
            if path.contains("://") {
                diag.error_with_hint(
                    Self::PATHS,
                    format!("`{path}` is an absolute URL"),
                    "page paths are relative to site.url",
                );
            }
        }
    }
}
