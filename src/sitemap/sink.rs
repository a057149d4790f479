//! Destinations for rendered sitemap documents.

use super::{SitemapEntry, minify_xml, render_index, render_urlset};
use crate::{log, utils::plural_count};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Persists named sitemap documents. `name` is the file stem (`sitemap-blogs`).
pub trait SitemapSink {
    fn write_urlset(&self, name: &str, entries: &[SitemapEntry]) -> Result<()>;

    fn write_index(&self, name: &str, locations: &[String]) -> Result<()>;
}

impl<T: SitemapSink + ?Sized> SitemapSink for &T {
    fn write_urlset(&self, name: &str, entries: &[SitemapEntry]) -> Result<()> {
        (**self).write_urlset(name, entries)
    }

    fn write_index(&self, name: &str, locations: &[String]) -> Result<()> {
        (**self).write_index(name, locations)
    }
}

/// Writes `<dir>/<name>.xml`.
///
/// There is no locking: two concurrent runs writing the same directory race
/// and the last writer wins.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    minify: bool,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>, minify: bool) -> Self {
        Self {
            dir: dir.into(),
            minify,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.xml"))
    }

    fn write(&self, name: &str, xml: Vec<u8>, count: usize, noun: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create output directory {}", self.dir.display())
        })?;

        let path = self.path_for(name);
        let xml = minify_xml(xml, self.minify);
        fs::write(&path, &xml)
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        log!("sitemap"; "{}.xml ({})", name, plural_count(count, noun));
        Ok(())
    }
}

impl SitemapSink for FileSink {
    fn write_urlset(&self, name: &str, entries: &[SitemapEntry]) -> Result<()> {
        let xml = render_urlset(entries)?;
        self.write(name, xml, entries.len(), "url")
    }

    fn write_index(&self, name: &str, locations: &[String]) -> Result<()> {
        let xml = render_index(locations)?;
        self.write(name, xml, locations.len(), "sitemap")
    }
}

/// Collects rendered documents in memory, in write order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: parking_lot::Mutex<Vec<(String, Vec<u8>)>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names in the order they were written.
    pub fn names(&self) -> Vec<String> {
        self.documents
            .lock()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Latest document written under `name`.
    pub fn get(&self, name: &str) -> Option<String> {
        self.documents
            .lock()
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, xml)| String::from_utf8_lossy(xml).into_owned())
    }
}

#[cfg(test)]
impl SitemapSink for MemorySink {
    fn write_urlset(&self, name: &str, entries: &[SitemapEntry]) -> Result<()> {
        let xml = render_urlset(entries)?;
        self.documents.lock().push((name.to_string(), xml));
        Ok(())
    }

    fn write_index(&self, name: &str, locations: &[String]) -> Result<()> {
        let xml = render_index(locations)?;
        self.documents.lock().push((name.to_string(), xml));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("public/sitemaps"), false);

        sink.write_urlset("sitemap-pages", &[SitemapEntry::new("https://shop.example")])
            .unwrap();

        let xml = fs::read_to_string(sink.path_for("sitemap-pages")).unwrap();
        assert!(xml.contains("<loc>https://shop.example</loc>"));
        assert!(xml.contains('\n'));
    }

    #[test]
    fn test_file_sink_minified() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path(), true);

        sink.write_index("sitemapindex", &["https://shop.example/sitemap-pages.xml".into()])
            .unwrap();

        let xml = fs::read_to_string(dir.path().join("sitemapindex.xml")).unwrap();
        assert!(!xml.contains('\n'));
        assert!(xml.contains("<sitemap><loc>https://shop.example/sitemap-pages.xml</loc></sitemap>"));
    }

    #[test]
    fn test_file_sink_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path(), false);

        sink.write_urlset("sitemap-blogs", &[SitemapEntry::new("https://a.example/blogs")])
            .unwrap();
        sink.write_urlset("sitemap-blogs", &[SitemapEntry::new("https://b.example/blogs")])
            .unwrap();

        let xml = fs::read_to_string(sink.path_for("sitemap-blogs")).unwrap();
        assert!(xml.contains("https://b.example/blogs"));
        assert!(!xml.contains("https://a.example/blogs"));
    }

    #[test]
    fn test_file_sink_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let sink = FileSink::new(blocker.join("out"), false);
        assert!(sink.write_index("sitemapindex", &[]).is_err());
    }

    #[test]
    fn test_memory_sink_keeps_write_order() {
        let sink = MemorySink::new();
        sink.write_index("sitemapindex", &[]).unwrap();
        sink.write_urlset("sitemap-pages", &[]).unwrap();

        assert_eq!(sink.names(), vec!["sitemapindex", "sitemap-pages"]);
        assert!(sink.get("sitemap-pages").unwrap().contains("<urlset"));
        assert!(sink.get("sitemap-farmers").is_none());
    }
}
