//! `[output]` section configuration.
//!
//! ```toml
//! [output]
//! dir = "public"              # Output directory (relative to config dir)
//! index = "sitemapindex"      # Index file stem
//! minify = false              # Strip indentation from written XML
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::job::DEFAULT_INDEX_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub index: String,
    pub minify: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "public".into(),
            index: DEFAULT_INDEX_NAME.into(),
            minify: false,
        }
    }
}

impl OutputConfig {
    pub const INDEX: FieldPath = FieldPath::new("output.index");

    pub fn normalize(&mut self, root: &Path) {
        if self.dir.is_relative() {
            self.dir = root.join(&self.dir);
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.index.trim().is_empty() {
            diag.error(Self::INDEX, "index name must not be empty");
        } else if self.index.contains(['/', '\\']) || self.index.ends_with(".xml") {
            diag.error_with_hint(
                Self::INDEX,
                format!("`{}` is not a plain file stem", self.index),
                "use a name like \"sitemapindex\"",
            );
        }
    }
}
