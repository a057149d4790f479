//! `query` command: print one section's entries as JSON.
//!
//! Nothing is written to the output directory.

use super::common::open_store;
use crate::{
    config::SiteConfig,
    job::{JobConfig, Section, SitemapJob},
    sitemap::{SitemapEntry, SitemapSink},
};
use anyhow::{Result, bail};

/// Sink for a job that is only ever asked to build sections.
struct NoSink;

impl SitemapSink for NoSink {
    fn write_urlset(&self, name: &str, _entries: &[SitemapEntry]) -> Result<()> {
        bail!("query does not write sitemaps ({name})")
    }

    fn write_index(&self, name: &str, _locations: &[String]) -> Result<()> {
        bail!("query does not write sitemaps ({name})")
    }
}

/// Build the entries for `section`.
pub fn query_section(config: &SiteConfig, section: Section) -> Result<Vec<SitemapEntry>> {
    let store = open_store(config)?;
    let job = SitemapJob::new(JobConfig::from_site(config), store, NoSink);
    job.build_section(section)
}

/// Print `section` to stdout.
pub fn run_query(config: &SiteConfig, section: Section, pretty: bool) -> Result<()> {
    let entries = query_section(config, section)?;

    let formatted = if pretty {
        serde_json::to_string_pretty(&entries)?
    } else {
        serde_json::to_string(&entries)?
    };
    println!("{}", formatted);

    Ok(())
}
