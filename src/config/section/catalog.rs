//! `[catalog]` section configuration.

use crate::catalog::path::DEFAULT_MAX_DEPTH;
use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Longest category chain followed before the data is treated as malformed.
    pub max_depth: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CatalogConfig {
    pub const MAX_DEPTH: FieldPath = FieldPath::new("catalog.max_depth");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.max_depth == 0 {
            diag.error(Self::MAX_DEPTH, "must be at least 1");
        }
    }
}
