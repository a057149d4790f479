//! `build` command: write the index and every section file.

use super::common::open_store;
use crate::{
    config::SiteConfig,
    job::{JobConfig, RunReport, Section, SitemapJob},
    log,
    logger::ProgressLine,
    sitemap::FileSink,
    utils::plural_count,
};
use anyhow::Result;

/// Run the sitemap job against the configured source and output directory.
pub fn build_sitemaps(config: &SiteConfig) -> Result<RunReport> {
    let store = open_store(config)?;
    let sink = FileSink::new(&config.output.dir, config.output.minify);
    let job = SitemapJob::new(JobConfig::from_site(config), store, sink);

    log!("build"; "writing sitemaps to {}", config.output.dir.display());

    let progress = ProgressLine::new("build", &[("sections", Section::ALL.len())]);
    let report = job.run_with(|_| progress.inc("sections"))?;
    progress.finish();

    log!(
        "build";
        "{} in {}",
        plural_count(report.total_urls(), "url"),
        plural_count(report.sections.len() + 1, "file")
    );
    Ok(report)
}
