//! `[source]` section configuration.
//!
//! Exactly one catalog source must be set:
//!
//! ```toml
//! [source]
//! database = "storage/app.sqlite"   # SQLite database (relative to config dir)
//! # snapshot = "catalog.json"        # or a JSON snapshot
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// SQLite catalog database.
    pub database: Option<PathBuf>,
    /// JSON catalog snapshot.
    pub snapshot: Option<PathBuf>,
}

/// Resolved catalog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind<'a> {
    Database(&'a Path),
    Snapshot(&'a Path),
}

impl SourceConfig {
    pub const DATABASE: FieldPath = FieldPath::new("source.database");
    pub const SNAPSHOT: FieldPath = FieldPath::new("source.snapshot");

    /// The configured source, if exactly one is set.
    pub fn kind(&self) -> Option<SourceKind<'_>> {
        match (&self.database, &self.snapshot) {
            (Some(db), None) => Some(SourceKind::Database(db)),
            (None, Some(snapshot)) => Some(SourceKind::Snapshot(snapshot)),
            _ => None,
        }
    }

    /// Resolve relative paths against `root`.
    pub fn normalize(&mut self, root: &Path) {
        for path in [&mut self.database, &mut self.snapshot].into_iter().flatten() {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match (&self.database, &self.snapshot) {
            (None, None) => diag.error_with_hint(
                Self::DATABASE,
                "no catalog source configured",
                format!("set {} or {}", Self::DATABASE, Self::SNAPSHOT),
            ),
            (Some(_), Some(_)) => diag.error(
                Self::SNAPSHOT,
                format!("{} and {} are mutually exclusive", Self::DATABASE, Self::SNAPSHOT),
            ),
            _ => {}
        }
    }
}
