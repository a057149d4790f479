//! `init` command: write a commented `sitemap.toml`.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::fs;

/// Generate sitemap.toml content with comments
pub fn generate_config_template() -> String {
    format!(
        r#"# sitemap-job configuration (v{version})

[site]
# Front-end origin every sitemap URL is built from
url = "https://shop.example"

[source]
# SQLite catalog, relative to this file
database = "storage/app.sqlite"
# Or a JSON snapshot instead of a database
# snapshot = "catalog.json"

[output]
dir = "public"
# Index file stem; "sitemap" writes the index as sitemap.xml
index = "sitemapindex"
minify = false

[pages]
paths = [{pages}]

[catalog]
# Longer category chains are reported as malformed data
max_depth = {max_depth}
"#,
        version = env!("CARGO_PKG_VERSION"),
        pages = crate::job::DEFAULT_PAGES
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", "),
        max_depth = crate::catalog::path::DEFAULT_MAX_DEPTH,
    )
}

/// Write the config template to `config.config_path`.
///
/// If `dry_run` is true, only prints the template to stdout
pub fn write_config(config: &SiteConfig, dry_run: bool) -> Result<()> {
    let content = generate_config_template();
    if dry_run {
        print!("{content}");
        return Ok(());
    }

    let path = &config.config_path;
    if path.exists() {
        bail!(
            "'{}' already exists.\nRemove it or pass a different --config name.",
            path.display()
        );
    }

    fs::create_dir_all(config.get_root()).with_context(|| {
        format!("Failed to create directory '{}'", config.get_root().display())
    })?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    log!("init"; "wrote {}", path.display());
    Ok(())
}
