//! Helpers shared by the commands that read the catalog.

use crate::{
    catalog::{CatalogStore, MemoryStore, SqliteStore},
    config::{SiteConfig, SourceKind},
    debug,
};
use anyhow::{Context, Result, bail};

/// Open the catalog source named in the config.
pub fn open_store(config: &SiteConfig) -> Result<Box<dyn CatalogStore>> {
    let Some(kind) = config.source.kind() else {
        bail!("No catalog source configured");
    };

    let store: Box<dyn CatalogStore> = match kind {
        SourceKind::Database(path) => {
            debug!("source"; "opening database {}", path.display());
            Box::new(
                SqliteStore::open(path)
                    .with_context(|| format!("Failed to open catalog {}", path.display()))?,
            )
        }
        SourceKind::Snapshot(path) => {
            debug!("source"; "loading snapshot {}", path.display());
            Box::new(
                MemoryStore::load(path)
                    .with_context(|| format!("Failed to load catalog {}", path.display()))?,
            )
        }
    };
    Ok(store)
}
