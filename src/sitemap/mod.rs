//! Sitemap documents.
//!
//! - **Entry**: one `<url>` with optional `lastmod`, `changefreq`, `priority`
//! - **XML**: urlset and sitemap index rendering (`quick-xml`)
//! - **Sink**: where rendered documents go (`FileSink` in production)

pub mod entry;
pub mod sink;
pub mod xml;

pub use entry::{ChangeFreq, SitemapEntry};
pub use sink::{FileSink, SitemapSink};
pub use xml::{SITEMAP_NS, render_index, render_urlset};

#[cfg(test)]
pub use sink::MemorySink;

/// Minify XML content if enabled.
pub fn minify_xml(content: Vec<u8>, enabled: bool) -> Vec<u8> {
    if !enabled {
        return content;
    }
    match String::from_utf8(content) {
        Ok(xml) => xml
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("")
            .into_bytes(),
        Err(err) => err.into_bytes(),
    }
}
